//! Runtime settings from the environment, plus logging setup.

use std::env;
use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::presets::DEFAULT_PRESETS_DIR;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub const ENV_BIND: &str = "EF_TRAINER_BIND";
pub const ENV_DATA: &str = "EF_TRAINER_DATA";
pub const ENV_PRESETS: &str = "EF_TRAINER_PRESETS";
pub const ENV_WORKERS: &str = "EF_TRAINER_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    /// Optional JSON/YAML catalog replacing the builtin tables.
    pub data_path: Option<PathBuf>,
    pub presets_dir: PathBuf,
    /// Batch solver threads; 0 = all cores.
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_path: None,
            presets_dir: PathBuf::from(DEFAULT_PRESETS_DIR),
            workers: 0,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let workers = match get(ENV_WORKERS) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                warn!("invalid {ENV_WORKERS} '{raw}', defaulting to {}", defaults.workers);
                defaults.workers
            }),
            None => defaults.workers,
        };

        Self {
            bind_addr: get(ENV_BIND).unwrap_or(defaults.bind_addr),
            data_path: get(ENV_DATA).map(PathBuf::from),
            presets_dir: get(ENV_PRESETS)
                .map(PathBuf::from)
                .unwrap_or(defaults.presets_dir),
            workers,
        }
    }
}

/// Install the stderr fmt subscriber. `RUST_LOG` overrides the default `info`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
