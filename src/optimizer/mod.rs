pub mod compare;
pub mod solver;

pub use compare::{compare_builds, Build, BuildComparison, StatComparison};
pub use solver::{
    solve, solve_for_player, solve_with_report, SolveReport, TargetOutcome, TargetStatus,
    SEARCH_CEILING,
};
