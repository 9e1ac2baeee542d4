//! Error types for pool construction and job submission.

use thiserror::Error;

/// Configuration rejected before any worker is spawned.
///
/// Each validation failure has its own variant so callers can branch on the
/// cause without matching on message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `pool_size` was zero or negative.
    #[error("pool size must be a positive integer")]
    NonPositivePoolSize,
    /// `queue_size` was negative.
    #[error("queue size must be a positive integer or 0")]
    NegativeQueueSize,
    /// `pool_capacity` was negative.
    #[error("pool capacity must be a positive integer or 0")]
    NegativePoolCapacity,
    /// `pool_capacity` was nonzero but smaller than `pool_size`.
    #[error("pool capacity must be larger than pool size or 0")]
    IllegalPoolCapacity,
    /// Configuration document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
    /// An environment variable held a value that is not an integer.
    #[error("invalid value `{value}` for {key}")]
    InvalidEnv {
        /// Variable name.
        key: String,
        /// Raw value found in the environment.
        value: String,
    },
}

/// Errors produced when creating a pool or spawning its threads.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The supplied configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The OS refused to spawn a worker or timer thread.
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Reasons a non-panicking submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The pool has been closed; no further jobs are accepted.
    #[error("pool is closed")]
    Closed,
    /// The queue has no free slot and no worker is ready to take the job.
    #[error("job queue is full")]
    Full,
}
