//! Training point costs. The k-th level of a category costs `(k - 1) / 4 + 1`
//! points: levels 1-4 cost 1 each, 5-8 cost 2, 9-12 cost 3, and so on.

use serde::Serialize;

use crate::error::LevelChangeError;
use crate::training::selection::Allocation;

/// Levels per cost step.
pub const LEVELS_PER_STEP: i64 = 4;

/// Cost of buying level `k` (1-based). Zero for `k <= 0`.
pub fn marginal_cost(k: i32) -> i64 {
    if k <= 0 {
        return 0;
    }
    (i64::from(k) - 1) / LEVELS_PER_STEP + 1
}

/// Cost of levels 1..=n of a single category. Zero for `n <= 0`.
pub fn level_cost(n: i32) -> i64 {
    if n <= 0 {
        return 0;
    }
    let n = i64::from(n);
    let full_steps = n / LEVELS_PER_STEP;
    let partial = n % LEVELS_PER_STEP;
    // Each complete step s (1-based) contributes 4 * s.
    LEVELS_PER_STEP * full_steps * (full_steps + 1) / 2 + partial * (full_steps + 1)
}

/// Points needed to buy the level after `level`.
pub fn next_level_cost(level: i32) -> i64 {
    marginal_cost(level.max(0).saturating_add(1))
}

/// Points needed to raise a category from `from` to `to`; zero when not raising.
pub fn raise_cost(from: i32, to: i32) -> i64 {
    if to <= from {
        return 0;
    }
    level_cost(to) - level_cost(from)
}

/// Total points an allocation consumes across all categories.
pub fn total_cost(allocation: &Allocation) -> i64 {
    allocation
        .values()
        .map(|&level| level_cost(level))
        .fold(0, i64::saturating_add)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub budget: i64,
    pub used: i64,
    pub remaining: i64,
    pub over_budget: bool,
}

pub fn budget_status(allocation: &Allocation, budget: i64) -> BudgetStatus {
    let used = total_cost(allocation);
    let remaining = budget.saturating_sub(used);
    BudgetStatus {
        budget,
        used,
        remaining,
        over_budget: remaining < 0,
    }
}

/// Move one category by `delta` levels. Lowering is always allowed and stops
/// at 0; raising must fit in what the budget has left.
pub fn adjust_level(
    allocation: &Allocation,
    category: &str,
    delta: i32,
    budget: i64,
) -> Result<Allocation, LevelChangeError> {
    let current = allocation.get(category).copied().unwrap_or(0);
    let target = current.saturating_add(delta).max(0);

    if target > current {
        let cost = raise_cost(current, target);
        let remaining = budget.saturating_sub(total_cost(allocation));
        if cost > remaining {
            return Err(LevelChangeError::OverBudget {
                category: category.to_string(),
                from: current,
                to: target,
                cost,
                remaining,
            });
        }
    }

    let mut next = allocation.clone();
    next.insert(category.to_string(), target);
    Ok(next)
}
