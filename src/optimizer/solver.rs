//! Greedy, priority-ordered allocation of a training budget to stat targets.
//!
//! Targets are taken in [TargetSet::ordered] order. Each one raises only the
//! category that owns its stat, one level at a time from the level already
//! committed, and keeps the first level that meets the threshold. A target
//! that runs out of budget or hits [SEARCH_CEILING] leaves the allocation
//! untouched so the points stay available for later targets.

use serde::Serialize;
use tracing::debug;

use crate::data::players::PlayerDef;
use crate::data::registry::GameData;
use crate::training::{
    budget_status, compute_stat, compute_stats, total_cost, Allocation, BudgetStatus,
    ModifierSelection, StatLine, Target, TargetSet,
};

/// Highest level probed for a single category.
pub const SEARCH_CEILING: i32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetStatus {
    /// Met at `level` (possibly the level already committed).
    Satisfied { category: String, level: i32 },
    /// The next level would exceed the budget before the threshold was met.
    OverBudget { category: String },
    /// The threshold was not met by [SEARCH_CEILING].
    Unreachable { category: String },
    /// No category trains the stat.
    Untrainable,
}

impl TargetStatus {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    #[serde(flatten)]
    pub target: Target,
    #[serde(flatten)]
    pub status: TargetStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub allocation: Allocation,
    pub budget: BudgetStatus,
    pub outcomes: Vec<TargetOutcome>,
    /// Final stats under the returned allocation.
    pub stats: StatLine,
}

impl SolveReport {
    pub fn satisfied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_satisfied())
            .count()
    }
}

/// Allocation only; see [solve_with_report] for per-target outcomes.
pub fn solve(
    data: &GameData,
    base: &StatLine,
    selection: &ModifierSelection,
    targets: &TargetSet,
    budget: i64,
) -> Allocation {
    run(data, base, selection, targets, budget).0
}

pub fn solve_with_report(
    data: &GameData,
    base: &StatLine,
    selection: &ModifierSelection,
    targets: &TargetSet,
    budget: i64,
) -> SolveReport {
    let (allocation, outcomes) = run(data, base, selection, targets, budget);
    let stats = compute_stats(data, base, &allocation, selection);
    SolveReport {
        budget: budget_status(&allocation, budget),
        allocation,
        outcomes,
        stats,
    }
}

/// Solve against a catalog player's base stats.
pub fn solve_for_player(
    data: &GameData,
    player: &PlayerDef,
    selection: &ModifierSelection,
    targets: &TargetSet,
    budget: i64,
) -> SolveReport {
    solve_with_report(data, &player.initial_stats, selection, targets, budget)
}

fn run(
    data: &GameData,
    base: &StatLine,
    selection: &ModifierSelection,
    targets: &TargetSet,
    budget: i64,
) -> (Allocation, Vec<TargetOutcome>) {
    let mut levels = data.categories.zero_allocation();
    let mut outcomes = Vec::with_capacity(targets.len());

    for target in targets.ordered() {
        let status = match data.categories.owning_category(&target.stat) {
            None => TargetStatus::Untrainable,
            Some(category) => {
                let status = probe(data, base, selection, &levels, &category.name, &target, budget);
                if let TargetStatus::Satisfied { level, .. } = &status {
                    levels.insert(category.name.clone(), *level);
                }
                status
            }
        };
        debug!(
            stat = %target.stat,
            threshold = target.value,
            priority = target.priority,
            ?status,
            "target processed"
        );
        outcomes.push(TargetOutcome { target, status });
    }

    (levels, outcomes)
}

/// Find the lowest level of `category`, starting at its committed level, that
/// brings the target stat to its threshold within budget.
fn probe(
    data: &GameData,
    base: &StatLine,
    selection: &ModifierSelection,
    committed: &Allocation,
    category: &str,
    target: &Target,
    budget: i64,
) -> TargetStatus {
    let start = committed.get(category).copied().unwrap_or(0);
    let mut candidate = committed.clone();

    for level in start..=SEARCH_CEILING {
        candidate.insert(category.to_string(), level);
        if total_cost(&candidate) > budget {
            return TargetStatus::OverBudget {
                category: category.to_string(),
            };
        }
        let reached = compute_stat(data, base, &candidate, selection, &target.stat);
        if reached.is_some_and(|value| value >= target.value) {
            return TargetStatus::Satisfied {
                category: category.to_string(),
                level,
            };
        }
    }

    TargetStatus::Unreachable {
        category: category.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finishing_only(value: i32) -> StatLine {
        [("Finishing".to_string(), value)].into_iter().collect()
    }

    fn targets(entries: &[(&str, i32, u32)]) -> TargetSet {
        let mut set = TargetSet::new();
        for &(stat, value, priority) in entries {
            set.insert(stat, value, priority);
        }
        set
    }

    #[test]
    fn raises_shooting_to_the_minimum_passing_level() {
        let data = GameData::builtin();
        let result = solve(
            &data,
            &finishing_only(90),
            &ModifierSelection::default(),
            &targets(&[("Finishing", 93, 1)]),
            10,
        );
        assert_eq!(result["Shooting"], 3);
        assert_eq!(total_cost(&result), 3);
        assert_eq!(result.len(), data.categories.len());
    }

    #[test]
    fn unaffordable_target_leaves_category_untouched() {
        let data = GameData::builtin();
        let report = solve_with_report(
            &data,
            &finishing_only(90),
            &ModifierSelection::default(),
            &targets(&[("Finishing", 93, 1)]),
            0,
        );
        assert_eq!(report.allocation["Shooting"], 0);
        assert_eq!(report.stats["Finishing"], 90);
        assert_eq!(
            report.outcomes[0].status,
            TargetStatus::OverBudget {
                category: "Shooting".to_string()
            }
        );
    }

    #[test]
    fn already_met_target_commits_current_level() {
        let data = GameData::builtin();
        let report = solve_with_report(
            &data,
            &finishing_only(95),
            &ModifierSelection::default(),
            &targets(&[("Finishing", 93, 1)]),
            10,
        );
        assert_eq!(
            report.outcomes[0].status,
            TargetStatus::Satisfied {
                category: "Shooting".to_string(),
                level: 0
            }
        );
    }

    #[test]
    fn untrainable_and_unreachable_targets_are_skipped() {
        let data = GameData::builtin();
        let mut base = finishing_only(10);
        base.insert("Weak Foot".to_string(), 2);
        let report = solve_with_report(
            &data,
            &base,
            &ModifierSelection::default(),
            &targets(&[("Weak Foot", 4, 1), ("Finishing", 150, 2)]),
            100_000,
        );
        assert_eq!(report.outcomes[0].status, TargetStatus::Untrainable);
        assert_eq!(
            report.outcomes[1].status,
            TargetStatus::Unreachable {
                category: "Shooting".to_string()
            }
        );
        assert_eq!(total_cost(&report.allocation), 0);
    }

    #[test]
    fn negative_budget_returns_all_zero() {
        let data = GameData::builtin();
        let result = solve(
            &data,
            &finishing_only(90),
            &ModifierSelection::default(),
            &targets(&[("Finishing", 90, 1)]),
            -1,
        );
        assert!(result.values().all(|&level| level == 0));
    }
}
