//! Side-by-side comparison of two builds (same or different players).

use serde::{Deserialize, Serialize};

use crate::data::players::ordered_stat_names;
use crate::data::registry::GameData;
use crate::training::{
    budget_status, compute_stats, Allocation, BudgetStatus, ModifierSelection, StatLine,
};

/// One configured build: whose stats, how they are trained, and what is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    pub base: StatLine,
    #[serde(default)]
    pub allocation: Allocation,
    #[serde(default)]
    pub selection: ModifierSelection,
    pub budget: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatComparison {
    pub stat: String,
    pub a: Option<i32>,
    pub b: Option<i32>,
    /// `a - b` when both sides carry the stat.
    pub diff: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildComparison {
    pub rows: Vec<StatComparison>,
    pub budget_a: BudgetStatus,
    pub budget_b: BudgetStatus,
}

impl BuildComparison {
    /// Rows where A is strictly ahead.
    pub fn a_leads(&self) -> impl Iterator<Item = &StatComparison> {
        self.rows.iter().filter(|row| row.diff.is_some_and(|d| d > 0))
    }

    pub fn b_leads(&self) -> impl Iterator<Item = &StatComparison> {
        self.rows.iter().filter(|row| row.diff.is_some_and(|d| d < 0))
    }
}

pub fn compare_builds(data: &GameData, a: &Build, b: &Build) -> BuildComparison {
    let stats_a = compute_stats(data, &a.base, &a.allocation, &a.selection);
    let stats_b = compute_stats(data, &b.base, &b.allocation, &b.selection);

    let mut union = stats_a.clone();
    for (stat, &value) in &stats_b {
        union.entry(stat.clone()).or_insert(value);
    }

    let rows = ordered_stat_names(&union)
        .into_iter()
        .map(|stat| {
            let left = stats_a.get(stat).copied();
            let right = stats_b.get(stat).copied();
            StatComparison {
                stat: stat.to_string(),
                a: left,
                b: right,
                diff: left.zip(right).map(|(l, r)| l.saturating_sub(r)),
            }
        })
        .collect();

    BuildComparison {
        rows,
        budget_a: budget_status(&a.allocation, a.budget),
        budget_b: budget_status(&b.allocation, b.budget),
    }
}
