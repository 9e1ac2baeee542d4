//! Worker threads that drain the shared job queue.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use tracing::{debug, error};

use super::pool::PoolCounters;
use super::queue::Job;

/// Idle/busy flag shared between a worker thread and the pool.
///
/// The pool reads it without synchronizing against the worker, so a read is
/// only a hint of what the worker is doing right now.
#[derive(Debug)]
struct WorkerState {
    waiting: AtomicBool,
}

impl WorkerState {
    fn set_waiting(&self, waiting: bool) {
        self.waiting.store(waiting, Ordering::Relaxed);
    }

    fn is_waiting(&self) -> bool {
        self.waiting.load(Ordering::Relaxed)
    }
}

/// One executor thread of a pool.
///
/// A worker has no stop signal of its own: its loop ends once the queue is
/// closed and every buffered job has been taken.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    state: Arc<WorkerState>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a worker thread consuming from `rx`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be created.
    pub(crate) fn spawn(
        id: usize,
        rx: Receiver<Job>,
        counters: Arc<PoolCounters>,
        stack_size: Option<usize>,
    ) -> std::io::Result<Self> {
        let state = Arc::new(WorkerState {
            waiting: AtomicBool::new(true),
        });
        let thread_state = Arc::clone(&state);

        let mut builder = thread::Builder::new().name(format!("ep-worker-{id}"));
        if let Some(size) = stack_size {
            builder = builder.stack_size(size);
        }
        let handle = builder.spawn(move || run(id, &rx, &thread_state, &counters))?;

        Ok(Self {
            id,
            state,
            handle: Some(handle),
        })
    }

    /// Position of this worker in the pool.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Whether the worker is blocked waiting for a job.
    ///
    /// Meaningless once the worker has exited.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.state.is_waiting()
    }

    /// Take the thread handle so it can be joined outside the pool's lock.
    pub(crate) fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.handle.take()
    }
}

fn run(id: usize, rx: &Receiver<Job>, state: &WorkerState, counters: &PoolCounters) {
    debug!(worker_id = id, "Worker thread started");
    state.set_waiting(true);

    // recv fails only once the queue is closed and empty
    while let Ok(job) = rx.recv() {
        state.set_waiting(false);
        match panic::catch_unwind(AssertUnwindSafe(job)) {
            Ok(()) => {
                counters.completed_jobs.fetch_add(1, Ordering::Relaxed);
            }
            Err(payload) => {
                counters.panicked_jobs.fetch_add(1, Ordering::Relaxed);
                error!(
                    worker_id = id,
                    panic = panic_message(payload.as_ref()),
                    "Job panicked, worker continues"
                );
            }
        }
        state.set_waiting(true);
    }

    debug!(worker_id = id, "Worker queue closed and drained, exiting");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
