//! Parallel solving of independent build requests.
//!
//! The solver is a pure function of its inputs, so a batch (every player in
//! the catalog against the same targets, say) fans out one request per task.
//! Results come back in request order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::registry::GameData;
use crate::optimizer::solver::{solve_with_report, SolveReport};
use crate::parallel::pool::WorkerPool;
use crate::training::{ModifierSelection, StatLine, TargetSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub base: StatLine,
    #[serde(default)]
    pub selection: ModifierSelection,
    pub targets: TargetSet,
    pub budget: i64,
}

pub fn solve_batch(
    data: &GameData,
    requests: &[SolveRequest],
    pool: &WorkerPool,
) -> Vec<SolveReport> {
    info!(requests = requests.len(), workers = pool.workers, "solving batch");
    pool.install(|| {
        requests
            .par_iter()
            .map(|request| {
                solve_with_report(
                    data,
                    &request.base,
                    &request.selection,
                    &request.targets,
                    request.budget,
                )
            })
            .collect()
    })
}
