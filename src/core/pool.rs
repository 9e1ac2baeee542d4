//! Elastic worker pool: a floor of always-running workers that grows towards
//! an optional ceiling while every worker is busy.
//!
//! # Scaling
//!
//! Before each submission the pool checks whether all workers are busy. If so,
//! and the ceiling has not been reached, one worker is appended before the job
//! is queued. The busy check reads each worker's flag without synchronizing
//! against the worker itself, so under contention a worker may be added
//! slightly early or late. The collection is append-only: workers are never
//! reaped, and the population is bounded only by the configured capacity.
//!
//! # Shutdown
//!
//! [`Pool::close`] closes the queue and returns immediately. Workers finish
//! whatever is already buffered, then exit. [`Pool::close_and_join`] also waits
//! for them.
//!
//! # Example
//!
//! ```rust
//! use prometheus_elastic_pool::{Pool, PoolConfig};
//!
//! let pool = Pool::new(&PoolConfig::new(2).with_pool_capacity(4).with_queue_size(8))?;
//! pool.schedule(|| println!("hello from a worker"));
//! pool.close_and_join();
//! # Ok::<(), prometheus_elastic_pool::PoolError>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PoolConfig, PoolLimits};
use crate::runtime::{Spawn, ThreadSpawner};

use super::queue::{Job, JobQueue};
use super::worker::Worker;
use super::{PoolError, ScheduleError};

/// Point-in-time view of pool utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Workers spawned so far.
    pub worker_count: usize,
    /// Workers currently waiting for a job.
    pub idle_workers: usize,
    /// Jobs buffered in the queue.
    pub queued_jobs: usize,
    /// Jobs accepted into the queue.
    pub submitted_jobs: u64,
    /// Jobs that ran to completion.
    pub completed_jobs: u64,
    /// Jobs that panicked.
    pub panicked_jobs: u64,
}

/// Job counters shared with worker threads.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub submitted_jobs: AtomicU64,
    pub completed_jobs: AtomicU64,
    pub panicked_jobs: AtomicU64,
}

struct PoolInner {
    limits: PoolLimits,
    stack_size: Option<usize>,
    queue: JobQueue,
    workers: Mutex<Vec<Worker>>,
    counters: Arc<PoolCounters>,
}

/// Bounded, dynamically growing worker pool.
///
/// `Pool` is a cheap handle; clones share the same queue and workers. When the
/// last handle is dropped the queue is closed as if [`Pool::close`] had been
/// called.
#[derive(Clone)]
pub struct Pool {
    inner: Arc<PoolInner>,
}

impl Pool {
    /// Create a pool and start `pool_size` workers.
    ///
    /// # Errors
    ///
    /// - `PoolError::Config` if the configuration is invalid; no thread is
    ///   spawned in that case
    /// - `PoolError::Spawn` if a worker thread cannot be created
    pub fn new(config: &PoolConfig) -> Result<Self, PoolError> {
        let limits = config.validate()?;

        let inner = PoolInner {
            limits,
            stack_size: config.thread_stack_size,
            queue: JobQueue::new(limits.queue_size),
            workers: Mutex::new(Vec::with_capacity(limits.pool_size)),
            counters: Arc::new(PoolCounters::default()),
        };

        {
            let mut workers = inner.workers.lock();
            for id in 0..limits.pool_size {
                workers.push(inner.spawn_worker(id)?);
            }
        }

        info!(
            pool_size = limits.pool_size,
            pool_capacity = limits.capacity.map_or(0, std::num::NonZeroUsize::get),
            queue_size = limits.queue_size,
            "Pool initialized"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Submit a job, blocking while the queue is full.
    ///
    /// If every worker is busy and the ceiling allows it, one worker is added
    /// first.
    ///
    /// # Panics
    ///
    /// Panics if the pool has been closed. Scheduling after [`Pool::close`] is
    /// a usage error; use [`Pool::try_schedule`] to get an error instead.
    pub fn schedule<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Err(err) = self.inner.submit(Box::new(job)) {
            panic!("schedule called on a closed pool: {err}");
        }
    }

    /// Submit a job without blocking.
    ///
    /// Applies the same growth rule as [`Pool::schedule`].
    ///
    /// # Errors
    ///
    /// - `ScheduleError::Full` if the queue has no room for the job
    /// - `ScheduleError::Closed` if the pool has been closed
    pub fn try_schedule<F>(&self, job: F) -> Result<(), ScheduleError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.try_submit(Box::new(job))
    }

    /// Submit a job once `delay` has elapsed. Returns immediately.
    ///
    /// A dedicated timer thread is spawned per call; there is no way to cancel
    /// it. If the pool is closed by the time the delay elapses, the job is
    /// dropped with a warning.
    ///
    /// # Errors
    ///
    /// `PoolError::Spawn` if the timer thread cannot be created.
    pub fn schedule_with_delay<F>(&self, job: F, delay: Duration) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_with_delay_on(&ThreadSpawner, job, delay)
    }

    /// Like [`Pool::schedule_with_delay`], timed on the given spawner.
    ///
    /// # Errors
    ///
    /// Whatever the spawner reports when it cannot start the timer.
    pub fn schedule_with_delay_on<S, F>(
        &self,
        spawner: &S,
        job: F,
        delay: Duration,
    ) -> Result<(), PoolError>
    where
        S: Spawn,
        F: FnOnce() + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        spawner.spawn_after(delay, move || {
            if inner.submit(Box::new(job)).is_err() {
                warn!(delay = ?delay, "Pool closed before delayed job was due, dropping it");
            }
        })?;
        debug!(delay = ?delay, "Delayed job armed");
        Ok(())
    }

    /// Close the queue. Non-blocking.
    ///
    /// Buffered jobs still run; workers exit once the queue is empty. Calling
    /// `close` again is a no-op.
    pub fn close(&self) {
        self.inner.close();
    }

    /// Close the queue and wait for every worker to drain it and exit.
    ///
    /// Must not be called from inside a job running on this pool, since the
    /// calling worker would wait for itself.
    pub fn close_and_join(&self) {
        self.inner.close();

        let handles: Vec<_> = self
            .inner
            .workers
            .lock()
            .iter_mut()
            .filter_map(Worker::take_handle)
            .collect();

        for (idx, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                warn!(worker_id = idx, "Worker thread panicked");
            }
        }
        debug!("All workers joined");
    }

    /// Whether the pool has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.queue.is_closed()
    }

    /// Whether the pool is closed and no job is left in the queue.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.inner.queue.is_drained()
    }

    /// Number of workers spawned so far.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.inner.workers.lock().len()
    }

    /// Number of workers currently waiting for a job.
    #[must_use]
    pub fn idle_worker_count(&self) -> usize {
        self.inner
            .workers
            .lock()
            .iter()
            .filter(|w| w.is_waiting())
            .count()
    }

    /// Number of jobs buffered in the queue.
    #[must_use]
    pub fn queued_jobs(&self) -> usize {
        self.inner.queue.len()
    }

    /// Queue buffer size.
    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.inner.queue.capacity()
    }

    /// Sizing policy in effect.
    #[must_use]
    pub fn limits(&self) -> PoolLimits {
        self.inner.limits
    }

    /// Snapshot of current statistics.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let (worker_count, idle_workers) = {
            let workers = self.inner.workers.lock();
            (workers.len(), workers.iter().filter(|w| w.is_waiting()).count())
        };
        let counters = &self.inner.counters;
        PoolStats {
            worker_count,
            idle_workers,
            queued_jobs: self.inner.queue.len(),
            submitted_jobs: counters.submitted_jobs.load(Ordering::Relaxed),
            completed_jobs: counters.completed_jobs.load(Ordering::Relaxed),
            panicked_jobs: counters.panicked_jobs.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("limits", &self.inner.limits)
            .field("queue", &self.inner.queue)
            .field("worker_count", &self.worker_count())
            .finish()
    }
}

impl PoolInner {
    fn spawn_worker(&self, id: usize) -> std::io::Result<Worker> {
        Worker::spawn(
            id,
            self.queue.receiver(),
            Arc::clone(&self.counters),
            self.stack_size,
        )
    }

    /// Append a worker if every current worker is busy and the ceiling allows.
    fn grow_if_saturated(&self) {
        let mut workers = self.workers.lock();
        if !self.limits.can_grow(workers.len()) || workers.iter().any(Worker::is_waiting) {
            return;
        }

        let id = workers.len();
        match self.spawn_worker(id) {
            Ok(worker) => {
                workers.push(worker);
                debug!(worker_id = id, worker_count = id + 1, "All workers busy, added worker");
            }
            Err(e) => {
                warn!(worker_id = id, error = %e, "Failed to add worker, queueing on existing workers");
            }
        }
    }

    fn submit(&self, job: Job) -> Result<(), ScheduleError> {
        if self.queue.is_closed() {
            return Err(ScheduleError::Closed);
        }
        self.grow_if_saturated();
        self.queue.push(job)?;
        self.counters.submitted_jobs.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn try_submit(&self, job: Job) -> Result<(), ScheduleError> {
        if self.queue.is_closed() {
            return Err(ScheduleError::Closed);
        }
        self.grow_if_saturated();
        self.queue.try_push(job)?;
        self.counters.submitted_jobs.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn close(&self) {
        if self.queue.close() {
            info!(worker_count = self.workers.lock().len(), "Pool closed");
        }
    }
}

impl Drop for PoolInner {
    fn drop(&mut self) {
        if self.queue.close() {
            debug!("Pool dropped without explicit close, workers will drain and exit");
        }
    }
}
