//! Error types for the outer layers (data loading, presets, API requests).
//! The stat calculator, cost model and solver never fail; they return plain values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unable to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse json '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to parse yaml '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported catalog format '{path}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: String },
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Preset not found")]
    NotFound,

    #[error("preset name must not be blank")]
    InvalidName,

    #[error("no free preset id for '{0}'")]
    NoFreeId(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelChangeError {
    #[error("raising '{category}' from {from} to {to} costs {cost}, {remaining} point(s) remain")]
    OverBudget {
        category: String,
        from: i32,
        to: i32,
        cost: i64,
        remaining: i64,
    },
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid request body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error(transparent)]
    LevelChange(#[from] LevelChangeError),
}
