//! Startup-loaded game data (categories, boosters, manager tiers, players).
//! Load once, share via Arc with the API handlers and batch solver.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::boosters::BoosterCatalog;
use crate::data::categories::CategoryMap;
use crate::data::manager::ManagerTables;
use crate::data::players::{builtin_players, PlayerDef};
use crate::error::DataError;

/// Read-only bundle of every static table the calculator and solver consult.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub categories: CategoryMap,
    #[serde(default)]
    pub boosters: BoosterCatalog,
    #[serde(default)]
    pub managers: ManagerTables,
    #[serde(default = "builtin_players")]
    pub players: Vec<PlayerDef>,
}

impl GameData {
    pub fn builtin() -> Self {
        Self {
            categories: CategoryMap::builtin(),
            boosters: BoosterCatalog::builtin(),
            managers: ManagerTables::builtin(),
            players: builtin_players(),
        }
    }

    /// Load a catalog override from `.json`, `.yaml` or `.yml`. Sections the file
    /// omits keep their builtin tables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: display.clone(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => serde_json::from_str(&raw).map_err(|source| DataError::Json {
                path: display,
                source,
            }),
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&raw).map_err(|source| DataError::Yaml {
                    path: display,
                    source,
                })
            }
            _ => Err(DataError::UnsupportedFormat { path: display }),
        }
    }

    /// Builtin tables unless an override path is given and loads cleanly.
    pub fn load_or_builtin(path: Option<&Path>) -> Arc<Self> {
        let data = match path {
            Some(path) => match Self::load(path) {
                Ok(data) => {
                    info!(
                        path = %path.display(),
                        categories = data.categories.len(),
                        players = data.players.len(),
                        "loaded game data override"
                    );
                    data
                }
                Err(err) => {
                    warn!("{err}; falling back to builtin game data");
                    Self::builtin()
                }
            },
            None => Self::builtin(),
        };
        Arc::new(data)
    }

    /// Resolve by id, then case-insensitively by id or display name.
    pub fn player(&self, id_or_name: &str) -> Option<&PlayerDef> {
        let wanted = id_or_name.trim();
        self.players
            .iter()
            .find(|p| p.id == wanted)
            .or_else(|| {
                self.players.iter().find(|p| {
                    p.id.eq_ignore_ascii_case(wanted) || p.name.eq_ignore_ascii_case(wanted)
                })
            })
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::builtin()
    }
}
