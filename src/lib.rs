//! # Prometheus Elastic Pool
//!
//! A bounded, dynamically growing worker thread pool for fire-and-forget jobs.
//!
//! The pool keeps a floor of `pool_size` worker threads running at all times and
//! adds one more each time a job is submitted while every worker is busy, up to
//! an optional `pool_capacity` ceiling. Jobs flow through a single FIFO queue of
//! `queue_size` slots; a full queue makes submitters wait.
//!
//! ## Key Features
//!
//! - **Elastic workers**: grow on sustained demand, never beyond the ceiling
//! - **Backpressure**: bounded queue, or synchronous hand-off with `queue_size = 0`
//! - **Delayed submission**: timer threads or a tokio runtime via [`runtime::Spawn`]
//! - **Panic isolation**: a panicking job is logged and counted, its worker lives on
//! - **Non-blocking shutdown**: close the queue and let workers drain it
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use prometheus_elastic_pool::{Pool, PoolConfig};
//!
//! let pool = Pool::new(
//!     &PoolConfig::new(2)
//!         .with_pool_capacity(4)
//!         .with_queue_size(16),
//! )?;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! for _ in 0..8 {
//!     let counter = Arc::clone(&counter);
//!     pool.schedule(move || {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     });
//! }
//! pool.schedule_with_delay(|| println!("later"), Duration::from_millis(10))?;
//!
//! std::thread::sleep(Duration::from_millis(50));
//! pool.close_and_join();
//! assert_eq!(counter.load(Ordering::Relaxed), 8);
//! # Ok::<(), prometheus_elastic_pool::PoolError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Queue, worker and pool implementation.
pub mod core;
/// Configuration models for pool sizing.
pub mod config;
/// Builders to construct pools from settings.
pub mod builders;
/// Spawners for delayed submissions.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use builders::PoolBuilder;
pub use config::{PoolConfig, PoolLimits};
pub use crate::core::{ConfigError, Job, Pool, PoolError, PoolStats, ScheduleError};
