use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use tracing::{debug, info, warn};

pub mod api;
pub mod routes;

pub use api::AppState;

use routes::{error_response, HttpResponse};

/// Request line plus headers.
const MAX_HEADER_BYTES: u64 = 16 * 1024;
/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
const READ_TIMEOUT: Duration = Duration::from_secs(10);

pub fn run_server(state: &AppState, bind_addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    info!("ef-trainer server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(err) = handle_connection(state, &stream) {
                    warn!("request error: {err}");
                }
            }
            Err(err) => warn!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(state: &AppState, stream: &TcpStream) -> io::Result<()> {
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let mut reader = BufReader::new(stream);
    let mut writer = stream;

    let response = match read_request(&mut reader, &mut writer)? {
        Incoming::Closed => return Ok(()),
        Incoming::Rejected(response) => response,
        Incoming::Request { method, path, body } => {
            let response = routes::route_request(state, &method, &path, &body);
            debug!(%method, %path, status = response.status_code, "handled request");
            response
        }
    };

    writer.write_all(response.to_http_string().as_bytes())?;
    writer.flush()
}

#[derive(Debug)]
enum Incoming {
    Request {
        method: String,
        path: String,
        body: String,
    },
    /// Answer without routing.
    Rejected(HttpResponse),
    /// Peer closed before sending anything.
    Closed,
}

/// Read one request: headers up to the blank line, then exactly
/// `Content-Length` body bytes. Clients sending `Expect: 100-continue` get the
/// interim response before the body is read.
fn read_request<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<Incoming> {
    let mut header_budget = MAX_HEADER_BYTES;

    let mut request_line = String::new();
    let read = reader.by_ref().take(header_budget).read_line(&mut request_line)?;
    if read == 0 {
        return Ok(Incoming::Closed);
    }
    if !request_line.ends_with('\n') {
        return Ok(Incoming::Rejected(truncated_headers(read as u64, header_budget)));
    }
    header_budget -= read as u64;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("GET").to_string();
    let path = parts.next().unwrap_or("/").to_string();

    let mut content_length = 0_usize;
    let mut expects_continue = false;
    loop {
        let mut line = String::new();
        let read = reader.by_ref().take(header_budget).read_line(&mut line)?;
        if !line.ends_with('\n') {
            return Ok(Incoming::Rejected(truncated_headers(read as u64, header_budget)));
        }
        header_budget -= read as u64;

        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            match value.parse::<usize>() {
                Ok(length) => content_length = length,
                Err(_) => {
                    return Ok(Incoming::Rejected(error_response(
                        400,
                        "Bad Request",
                        "Invalid Content-Length",
                    )))
                }
            }
        } else if name.eq_ignore_ascii_case("expect") && value.eq_ignore_ascii_case("100-continue")
        {
            expects_continue = true;
        }
    }

    if content_length > MAX_BODY_BYTES {
        return Ok(Incoming::Rejected(error_response(
            413,
            "Payload Too Large",
            &format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
        )));
    }
    if expects_continue && content_length > 0 {
        writer.write_all(b"HTTP/1.1 100 Continue\r\n\r\n")?;
        writer.flush()?;
    }

    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(Incoming::Request {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// A header line without its newline: either the size cap cut it off or the
/// peer hung up mid-headers.
fn truncated_headers(read: u64, budget: u64) -> HttpResponse {
    if read >= budget {
        error_response(431, "Request Header Fields Too Large", "Request headers too large")
    } else {
        error_response(400, "Bad Request", "Incomplete request headers")
    }
}
