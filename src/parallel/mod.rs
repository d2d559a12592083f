pub mod batch;
pub mod pool;

pub use batch::validate_teams;
pub use pool::WorkerPool;
