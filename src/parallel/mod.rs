pub mod batch;
pub mod pool;

pub use batch::{solve_batch, SolveRequest};
pub use pool::WorkerPool;
