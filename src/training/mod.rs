pub mod calculator;
pub mod cost;
pub mod selection;
pub mod targets;

pub use calculator::{
    compute_stat, compute_stats, stat_breakdown, StatBreakdown, CRAFTED_BOOSTER_BONUS,
    MANAGER_BOOST_BONUS,
};
pub use cost::{
    adjust_level, budget_status, level_cost, marginal_cost, next_level_cost, raise_cost,
    total_cost, BudgetStatus, LEVELS_PER_STEP,
};
pub use selection::{Allocation, ModifierSelection, StatLine, MAX_MANAGER_BOOSTS};
pub use targets::{Target, TargetSet, TargetSpec};
