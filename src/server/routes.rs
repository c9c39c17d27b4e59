use crate::error::{PresetError, RequestError};
use crate::server::api::{self, AppState};

#[derive(Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/players") => match api::players_payload(state) {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/catalog") => match api::catalog_payload(state) {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/stats") => request_response(api::stats_payload(state, body)),
        ("POST", "/api/cost") => request_response(api::cost_payload(body)),
        ("POST", "/api/allocation/adjust") => request_response(api::adjust_payload(body)),
        ("POST", "/api/solve") => request_response(api::solve_payload(state, body)),
        ("POST", "/api/solve/all") => request_response(api::solve_all_payload(state, body)),
        ("POST", "/api/compare") => request_response(api::compare_payload(state, body)),
        ("GET", "/api/presets") => preset_response(api::presets_list_payload(state)),
        ("POST", "/api/presets") => preset_response(api::preset_post_payload(state, body)),
        ("GET", path) if path.starts_with("/api/presets/") => {
            preset_response(api::preset_get_payload(state, preset_id(path)))
        }
        ("DELETE", path) if path.starts_with("/api/presets/") => {
            preset_response(api::preset_delete_payload(state, preset_id(path)))
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn preset_id(path: &str) -> &str {
    path.trim_start_matches("/api/presets/")
        .split('/')
        .next()
        .unwrap_or("")
}

fn request_response(result: Result<String, RequestError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::json(payload),
        Err(err) => error_response(400, "Bad Request", &err.to_string()),
    }
}

fn preset_response(result: Result<String, PresetError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::json(payload),
        Err(PresetError::NotFound) => error_response(404, "Not Found", "Preset not found"),
        Err(err @ (PresetError::InvalidName | PresetError::Serialize(_))) => {
            error_response(400, "Bad Request", &err.to_string())
        }
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

pub(crate) fn error_response(
    status_code: u16,
    status_text: &'static str,
    message: &str,
) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
