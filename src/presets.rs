//! Named target presets, one JSON file per preset in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PresetError;
use crate::training::TargetSet;

pub const DEFAULT_PRESETS_DIR: &str = "data/presets";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub targets: TargetSet,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
    pub target_count: usize,
}

/// Base file id for a preset name: ASCII alphanumerics kept, everything else
/// `_`. Names with no ASCII alphanumerics fall back to `preset`. Distinct names
/// sharing a base id are told apart by [PresetStore::save].
pub fn preset_id_from_name(name: &str) -> String {
    let s: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let s = s.trim_matches('_');
    if s.is_empty() {
        "preset".to_string()
    } else {
        s.to_string()
    }
}

fn sanitize_preset_id(id: &str) -> Option<String> {
    let s: String = id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if s.is_empty() {
        None
    } else {
        Some(format!("{s}.json"))
    }
}

#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, PresetError> {
        sanitize_preset_id(id)
            .map(|file| self.dir.join(file))
            .ok_or(PresetError::NotFound)
    }

    /// Save under `name`. An existing preset with exactly this name is
    /// replaced; a different name that maps to the same id gets `_2`, `_3`, ...
    pub fn save(&self, name: &str, targets: &TargetSet) -> Result<Preset, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::InvalidName);
        }
        fs::create_dir_all(&self.dir)?;

        let (id, path) = self.slot_for(name)?;
        let preset = Preset {
            id,
            name: name.to_string(),
            targets: targets.clone(),
            saved_at: Utc::now(),
        };
        fs::write(&path, serde_json::to_string_pretty(&preset)?)?;
        debug!(id = %preset.id, path = %path.display(), "preset saved");
        Ok(preset)
    }

    /// First id for `name` that is free or already holds that exact name.
    /// Unreadable files count as taken.
    fn slot_for(&self, name: &str) -> Result<(String, PathBuf), PresetError> {
        let base = preset_id_from_name(name);
        for suffix in 1_u32.. {
            let id = if suffix == 1 {
                base.clone()
            } else {
                format!("{base}_{suffix}")
            };
            let path = self.path_for(&id)?;
            if !path.exists() {
                return Ok((id, path));
            }
            if read_preset(&path).is_ok_and(|existing| existing.name == name) {
                return Ok((id, path));
            }
        }
        Err(PresetError::NoFreeId(name.to_string()))
    }

    pub fn get(&self, id: &str) -> Result<Preset, PresetError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(PresetError::NotFound);
        }
        read_preset(&path)
    }

    pub fn delete(&self, id: &str) -> Result<(), PresetError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(PresetError::NotFound);
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// All readable presets sorted by name. A missing directory is an empty list.
    pub fn list(&self) -> Result<Vec<PresetSummary>, PresetError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut list = Vec::new();
        for entry in fs::read_dir(&self.dir)?.flatten() {
            let path = entry.path();
            if path.extension().map_or(true, |e| e != "json") {
                continue;
            }
            match read_preset(&path) {
                Ok(preset) => list.push(PresetSummary {
                    id: preset.id,
                    name: preset.name,
                    target_count: preset.targets.len(),
                }),
                Err(err) => warn!(path = %path.display(), "skipping unreadable preset: {err}"),
            }
        }
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}

fn read_preset(path: &Path) -> Result<Preset, PresetError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new(DEFAULT_PRESETS_DIR)
    }
}
