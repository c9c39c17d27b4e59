use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::boosters::normalize_booster_name;

/// Category name -> purchased training level. Missing categories read as 0.
pub type Allocation = BTreeMap<String, i32>;

/// Stat name -> value.
pub type StatLine = BTreeMap<String, i32>;

/// Manager-assigned +1 boosts beyond this count are ignored.
pub const MAX_MANAGER_BOOSTS: usize = 2;

/// The additive sources active on one build, each independently toggleable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierSelection {
    /// 0 means no manager.
    pub manager_tier: u32,
    pub primary_booster: Option<String>,
    /// Strength of the primary booster, usually 1..=5.
    pub primary_level: i32,
    pub manager_boosts: Vec<String>,
    /// Crafting-slot booster; always contributes +1.
    pub crafted_booster: Option<String>,
}

impl Default for ModifierSelection {
    fn default() -> Self {
        Self {
            manager_tier: 0,
            primary_booster: None,
            primary_level: 1,
            manager_boosts: Vec::new(),
            crafted_booster: None,
        }
    }
}

impl ModifierSelection {
    pub fn primary(&self) -> Option<&str> {
        self.primary_booster.as_deref().and_then(normalize_booster_name)
    }

    pub fn crafted(&self) -> Option<&str> {
        self.crafted_booster.as_deref().and_then(normalize_booster_name)
    }

    /// At most [MAX_MANAGER_BOOSTS] non-blank stat names, in the order given.
    pub fn active_manager_boosts(&self) -> impl Iterator<Item = &str> {
        self.manager_boosts
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(MAX_MANAGER_BOOSTS)
    }

    pub fn boosts_stat(&self, stat: &str) -> bool {
        self.active_manager_boosts().any(|s| s == stat)
    }
}
