//! Manager proficiency tiers and their threshold-bucketed bonus tables.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBonus {
    pub threshold: i32,
    pub bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerTier {
    pub tier: u32,
    #[serde(default)]
    pub label: String,
    /// Sorted by descending threshold.
    pub thresholds: Vec<ThresholdBonus>,
}

impl ManagerTier {
    fn new(tier: u32, label: &str, thresholds: [(i32, i32); 3]) -> Self {
        Self {
            tier,
            label: label.to_string(),
            thresholds: thresholds
                .iter()
                .map(|&(threshold, bonus)| ThresholdBonus { threshold, bonus })
                .collect(),
        }
    }

    /// Bonus of the first threshold `value` meets, scanning high to low.
    pub fn bonus_for(&self, value: i32) -> i32 {
        self.thresholds
            .iter()
            .find(|t| value >= t.threshold)
            .map_or(0, |t| t.bonus)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagerTables {
    tiers: Vec<ManagerTier>,
}

impl ManagerTables {
    pub fn new(tiers: Vec<ManagerTier>) -> Self {
        Self { tiers }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            ManagerTier::new(89, "89 (LBC)", [(84, 3), (56, 2), (40, 1)]),
            ManagerTier::new(88, "88 (Zeitzler)", [(85, 3), (57, 2), (40, 1)]),
            ManagerTier::new(87, "87 (Pep)", [(88, 3), (59, 2), (40, 1)]),
            ManagerTier::new(86, "86", [(89, 3), (60, 2), (40, 1)]),
            ManagerTier::new(85, "85 (Xabi)", [(93, 3), (62, 2), (40, 1)]),
        ])
    }

    pub fn tiers(&self) -> &[ManagerTier] {
        &self.tiers
    }

    /// Tier 0 means "no manager" and never resolves.
    pub fn get(&self, tier: u32) -> Option<&ManagerTier> {
        if tier == 0 {
            return None;
        }
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn is_supported(&self, tier: u32) -> bool {
        self.get(tier).is_some()
    }

    /// Unsupported tiers contribute nothing.
    pub fn bonus(&self, tier: u32, value: i32) -> i32 {
        self.get(tier).map_or(0, |t| t.bonus_for(value))
    }
}

impl Default for ManagerTables {
    fn default() -> Self {
        Self::builtin()
    }
}
