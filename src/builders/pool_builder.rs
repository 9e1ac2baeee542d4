//! Fluent builder for [`Pool`].

use crate::config::PoolConfig;
use crate::core::{Pool, PoolError};

/// Builder collecting pool settings before validation.
///
/// ```rust
/// use prometheus_elastic_pool::PoolBuilder;
///
/// let pool = PoolBuilder::new()
///     .pool_size(2)
///     .pool_capacity(8)
///     .queue_size(16)
///     .build()?;
/// assert_eq!(pool.worker_count(), 2);
/// pool.close();
/// # Ok::<(), prometheus_elastic_pool::PoolError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PoolBuilder {
    config: PoolConfig,
}

impl PoolBuilder {
    /// Start from [`PoolConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub const fn from_config(config: PoolConfig) -> Self {
        Self { config }
    }

    /// Minimum, always-running worker count.
    #[must_use]
    pub const fn pool_size(mut self, pool_size: i64) -> Self {
        self.config.pool_size = pool_size;
        self
    }

    /// Maximum worker count, `0` for unbounded.
    #[must_use]
    pub const fn pool_capacity(mut self, pool_capacity: i64) -> Self {
        self.config.pool_capacity = pool_capacity;
        self
    }

    /// Jobs buffered before submission blocks.
    #[must_use]
    pub const fn queue_size(mut self, queue_size: i64) -> Self {
        self.config.queue_size = queue_size;
        self
    }

    /// Stack size for worker threads, in bytes.
    #[must_use]
    pub const fn thread_stack_size(mut self, bytes: usize) -> Self {
        self.config.thread_stack_size = Some(bytes);
        self
    }

    /// Configuration collected so far.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Validate the configuration and start the pool.
    ///
    /// # Errors
    ///
    /// See [`Pool::new`].
    pub fn build(self) -> Result<Pool, PoolError> {
        Pool::new(&self.config)
    }
}
