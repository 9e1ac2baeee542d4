//! Queue, workers and the elastic pool that owns them.

pub mod error;
pub mod pool;
pub mod queue;
pub mod worker;

pub use error::{ConfigError, PoolError, ScheduleError};
pub use pool::{Pool, PoolStats};
pub use queue::{Job, JobQueue};
pub use worker::Worker;
