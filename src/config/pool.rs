//! Pool configuration structures.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Environment variable holding the worker floor.
pub const ENV_POOL_SIZE: &str = "ELASTIC_POOL_SIZE";
/// Environment variable holding the worker ceiling (0 = unbounded).
pub const ENV_POOL_CAPACITY: &str = "ELASTIC_POOL_CAPACITY";
/// Environment variable holding the job buffer size.
pub const ENV_QUEUE_SIZE: &str = "ELASTIC_POOL_QUEUE_SIZE";
/// Environment variable holding the worker thread stack size in bytes.
pub const ENV_STACK_SIZE: &str = "ELASTIC_POOL_STACK_SIZE";

/// Pool configuration as supplied by the caller.
///
/// Sizes are signed so that operator input such as `-1` survives parsing and
/// is rejected by [`PoolConfig::validate`] with a precise error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Minimum number of workers, always running until the pool is closed.
    pub pool_size: i64,
    /// Maximum number of workers. `0` means growth is unbounded.
    #[serde(default)]
    pub pool_capacity: i64,
    /// Jobs buffered before `schedule` blocks. `0` means synchronous hand-off.
    #[serde(default)]
    pub queue_size: i64,
    /// Stack size for worker threads; the platform default when unset.
    #[serde(default)]
    pub thread_stack_size: Option<usize>,
}

/// Validated sizing policy derived from a [`PoolConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolLimits {
    /// Worker floor.
    pub pool_size: usize,
    /// Worker ceiling, `None` when unbounded.
    pub capacity: Option<NonZeroUsize>,
    /// Queue buffer size.
    pub queue_size: usize,
}

impl PoolLimits {
    /// Whether a pool currently running `workers` workers may add one more.
    #[must_use]
    pub fn can_grow(&self, workers: usize) -> bool {
        self.capacity.is_none_or(|cap| workers < cap.get())
    }
}

impl Default for PoolConfig {
    /// One worker per logical CPU, unbounded growth, synchronous hand-off.
    fn default() -> Self {
        Self::new(i64::try_from(num_cpus::get()).unwrap_or(1))
    }
}

impl PoolConfig {
    /// Configuration with the given floor, unbounded growth and a
    /// zero-capacity queue.
    #[must_use]
    pub const fn new(pool_size: i64) -> Self {
        Self {
            pool_size,
            pool_capacity: 0,
            queue_size: 0,
            thread_stack_size: None,
        }
    }

    /// Set the worker ceiling.
    #[must_use]
    pub const fn with_pool_capacity(mut self, pool_capacity: i64) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }

    /// Set the queue buffer size.
    #[must_use]
    pub const fn with_queue_size(mut self, queue_size: i64) -> Self {
        self.queue_size = queue_size;
        self
    }

    /// Set the worker thread stack size.
    #[must_use]
    pub const fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = Some(bytes);
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, checked in the order pool size,
    /// queue size, capacity sign, capacity versus pool size.
    pub fn validate(&self) -> Result<PoolLimits, ConfigError> {
        let pool_size = usize::try_from(self.pool_size)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ConfigError::NonPositivePoolSize)?;
        let queue_size =
            usize::try_from(self.queue_size).map_err(|_| ConfigError::NegativeQueueSize)?;
        let capacity =
            usize::try_from(self.pool_capacity).map_err(|_| ConfigError::NegativePoolCapacity)?;
        let capacity = NonZeroUsize::new(capacity);
        if capacity.is_some_and(|cap| cap.get() < pool_size) {
            return Err(ConfigError::IllegalPoolCapacity);
        }
        Ok(PoolLimits {
            pool_size,
            capacity,
            queue_size,
        })
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed JSON, otherwise any validation error.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Missing variables fall back to [`PoolConfig::default`]. The result is
    /// validated.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidEnv` for values that are not integers, otherwise
    /// any validation error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let cfg = Self {
            pool_size: env_parse(ENV_POOL_SIZE)?.unwrap_or(defaults.pool_size),
            pool_capacity: env_parse(ENV_POOL_CAPACITY)?.unwrap_or(defaults.pool_capacity),
            queue_size: env_parse(ENV_QUEUE_SIZE)?.unwrap_or(defaults.queue_size),
            thread_stack_size: env_parse(ENV_STACK_SIZE)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    let Some(raw) = std::env::var(key).ok().filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        })
}
