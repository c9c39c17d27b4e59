//! Final stat computation: base value plus five additive layers applied in order.
//!
//! Layers run against the running value, so the manager bonus sees the
//! post-training value, not the raw base:
//!
//! 1. training (sum of levels of every category listing the stat)
//! 2. manager proficiency (threshold-bucketed on the running value)
//! 3. primary booster (+level)
//! 4. crafted booster (+1)
//! 5. manager-assigned stat boost (+1)

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::boosters::BoosterEffect;
use crate::data::registry::GameData;
use crate::training::selection::{Allocation, ModifierSelection, StatLine};

/// Flat bonus of the crafting-slot booster.
pub const CRAFTED_BOOSTER_BONUS: i32 = 1;
/// Flat bonus of a manager-assigned stat boost.
pub const MANAGER_BOOST_BONUS: i32 = 1;

/// Per-layer contributions for one stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatBreakdown {
    pub base: i32,
    pub training: i32,
    pub manager: i32,
    pub booster: i32,
    pub crafted: i32,
    pub manager_boost: i32,
    pub total: i32,
}

impl StatBreakdown {
    pub fn bonus(&self) -> i32 {
        self.total.saturating_sub(self.base)
    }
}

/// Borrowed view over the tables plus one build's selection. Resolves
/// booster names once instead of per stat.
struct LayerStack<'a> {
    data: &'a GameData,
    allocation: &'a Allocation,
    selection: &'a ModifierSelection,
    primary: BoosterEffect<'a>,
    crafted: BoosterEffect<'a>,
}

impl<'a> LayerStack<'a> {
    fn new(
        data: &'a GameData,
        allocation: &'a Allocation,
        selection: &'a ModifierSelection,
    ) -> Self {
        Self {
            data,
            allocation,
            selection,
            primary: data.boosters.effect(selection.primary()),
            crafted: data.boosters.effect(selection.crafted()),
        }
    }

    fn resolve(&self, stat: &str, base: i32) -> StatBreakdown {
        let mut layers = StatBreakdown {
            base,
            ..StatBreakdown::default()
        };
        let mut value = base;

        layers.training = self.data.categories.level_bonus(stat, self.allocation);
        value = value.saturating_add(layers.training);

        layers.manager = self.data.managers.bonus(self.selection.manager_tier, value);
        value = value.saturating_add(layers.manager);

        if self.primary.applies_to(stat) {
            layers.booster = self.selection.primary_level;
            value = value.saturating_add(layers.booster);
        }

        if self.crafted.applies_to(stat) {
            layers.crafted = CRAFTED_BOOSTER_BONUS;
            value = value.saturating_add(layers.crafted);
        }

        if self.selection.boosts_stat(stat) {
            layers.manager_boost = MANAGER_BOOST_BONUS;
            value = value.saturating_add(layers.manager_boost);
        }

        layers.total = value;
        layers
    }
}

/// Layer-by-layer contributions for every stat in `base`.
pub fn stat_breakdown(
    data: &GameData,
    base: &StatLine,
    allocation: &Allocation,
    selection: &ModifierSelection,
) -> BTreeMap<String, StatBreakdown> {
    let stack = LayerStack::new(data, allocation, selection);
    base.iter()
        .map(|(stat, &value)| (stat.clone(), stack.resolve(stat, value)))
        .collect()
}

/// Final value of every stat in `base`; no stat is added or dropped.
pub fn compute_stats(
    data: &GameData,
    base: &StatLine,
    allocation: &Allocation,
    selection: &ModifierSelection,
) -> StatLine {
    let stack = LayerStack::new(data, allocation, selection);
    base.iter()
        .map(|(stat, &value)| (stat.clone(), stack.resolve(stat, value).total))
        .collect()
}

/// Final value of a single stat, or None when `base` lacks it.
pub fn compute_stat(
    data: &GameData,
    base: &StatLine,
    allocation: &Allocation,
    selection: &ModifierSelection,
    stat: &str,
) -> Option<i32> {
    let value = *base.get(stat)?;
    Some(LayerStack::new(data, allocation, selection).resolve(stat, value).total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TOTAL_PACKAGE;

    fn base() -> StatLine {
        [("Finishing", 90), ("Speed", 82), ("GK Reach", 40), ("Weak Foot", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn no_modifiers_returns_base_plus_training() {
        let data = GameData::builtin();
        let mut allocation = Allocation::new();
        allocation.insert("Shooting".to_string(), 3);
        let stats = compute_stats(&data, &base(), &allocation, &ModifierSelection::default());
        assert_eq!(stats["Finishing"], 93);
        assert_eq!(stats["Speed"], 82);
        assert_eq!(stats.len(), 4);
    }

    #[test]
    fn manager_bonus_reads_post_training_value() {
        let data = GameData::builtin();
        let selection = ModifierSelection {
            manager_tier: 85,
            ..ModifierSelection::default()
        };
        // 90 alone earns +2 under tier 85; 93 after training crosses the +3 line.
        let untrained = compute_stats(&data, &base(), &Allocation::new(), &selection);
        assert_eq!(untrained["Finishing"], 92);

        let mut allocation = Allocation::new();
        allocation.insert("Shooting".to_string(), 3);
        let trained = compute_stats(&data, &base(), &allocation, &selection);
        assert_eq!(trained["Finishing"], 96);
    }

    #[test]
    fn total_package_skips_goalkeeping_stats() {
        let data = GameData::builtin();
        let selection = ModifierSelection {
            primary_booster: Some(TOTAL_PACKAGE.to_string()),
            primary_level: 2,
            ..ModifierSelection::default()
        };
        let stats = compute_stats(&data, &base(), &Allocation::new(), &selection);
        assert_eq!(stats["Speed"], 84);
        assert_eq!(stats["GK Reach"], 40);
        assert_eq!(stats["Weak Foot"], 5);
    }

    #[test]
    fn breakdown_layers_add_up_to_total() {
        let data = GameData::builtin();
        let mut allocation = Allocation::new();
        allocation.insert("Shooting".to_string(), 2);
        let selection = ModifierSelection {
            manager_tier: 89,
            primary_booster: Some("Son of God".to_string()),
            primary_level: 3,
            manager_boosts: vec!["Finishing".to_string()],
            crafted_booster: Some("Aerial".to_string()),
        };
        let breakdown = stat_breakdown(&data, &base(), &allocation, &selection);
        let finishing = breakdown["Finishing"];
        assert_eq!(
            finishing,
            StatBreakdown {
                base: 90,
                training: 2,
                manager: 3,
                booster: 3,
                crafted: 1,
                manager_boost: 1,
                total: 100,
            }
        );
        assert_eq!(finishing.bonus(), 10);
        assert_eq!(
            compute_stat(&data, &base(), &allocation, &selection, "Finishing"),
            Some(100)
        );
        assert_eq!(compute_stat(&data, &base(), &allocation, &selection, "Curl"), None);
    }

    #[test]
    fn crafted_total_package_also_skips_goalkeeping_stats() {
        let data = GameData::builtin();
        let selection = ModifierSelection {
            crafted_booster: Some(TOTAL_PACKAGE.to_string()),
            ..ModifierSelection::default()
        };
        let breakdown = stat_breakdown(&data, &base(), &Allocation::new(), &selection);
        assert_eq!(breakdown["Speed"].crafted, 1);
        assert_eq!(breakdown["Speed"].total, 83);
        assert_eq!(breakdown["GK Reach"].crafted, 0);
        assert_eq!(breakdown["GK Reach"].total, 40);
    }

    #[test]
    fn huge_levels_saturate_instead_of_overflowing() {
        let data = GameData::builtin();
        let mut allocation = Allocation::new();
        allocation.insert("Shooting".to_string(), i32::MAX);
        let selection = ModifierSelection {
            manager_tier: 89,
            primary_booster: Some(TOTAL_PACKAGE.to_string()),
            primary_level: 5,
            manager_boosts: vec!["Finishing".to_string()],
            crafted_booster: Some(TOTAL_PACKAGE.to_string()),
        };
        let breakdown = stat_breakdown(&data, &base(), &allocation, &selection);
        assert_eq!(breakdown["Finishing"].training, i32::MAX);
        assert_eq!(breakdown["Finishing"].total, i32::MAX);
        assert_eq!(breakdown["Speed"].total, 82 + 2 + 5 + 1);
    }
}
