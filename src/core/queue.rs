//! Shared FIFO hand-off between submitters and workers.
//!
//! The queue is a `crossbeam-channel` bounded channel. A capacity of zero makes
//! it a rendezvous channel: a push only completes once a worker receives the
//! job. Closing drops the producer side, so workers drain whatever is still
//! buffered and then see the channel as disconnected.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use super::ScheduleError;

/// A unit of work: no arguments, no result.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Bounded multi-producer, multi-consumer job queue.
pub struct JobQueue {
    /// Producer side. `None` once the queue has been closed.
    tx: Mutex<Option<Sender<Job>>>,
    /// Consumer side, cloned into every worker.
    rx: Receiver<Job>,
    capacity: usize,
}

impl JobQueue {
    /// Create a queue buffering up to `capacity` jobs.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded::<Job>(capacity);
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
            capacity,
        }
    }

    /// Producer handle, cloned so the lock is not held across a blocking send.
    fn sender(&self) -> Option<Sender<Job>> {
        self.tx.lock().clone()
    }

    /// Push a job, blocking while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::Closed` if the queue has been closed.
    pub fn push(&self, job: Job) -> Result<(), ScheduleError> {
        let tx = self.sender().ok_or(ScheduleError::Closed)?;
        tx.send(job).map_err(|_| ScheduleError::Closed)
    }

    /// Push a job without blocking.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::Full` if there is no free slot (for a zero-capacity
    ///   queue: no worker currently waiting to receive)
    /// - `ScheduleError::Closed` if the queue has been closed
    pub fn try_push(&self, job: Job) -> Result<(), ScheduleError> {
        let tx = self.sender().ok_or(ScheduleError::Closed)?;
        match tx.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ScheduleError::Full),
            Err(TrySendError::Disconnected(_)) => Err(ScheduleError::Closed),
        }
    }

    /// Consumer handle for a new worker.
    #[must_use]
    pub fn receiver(&self) -> Receiver<Job> {
        self.rx.clone()
    }

    /// Close the queue. Buffered jobs are still delivered.
    ///
    /// Returns `true` if this call closed the queue, `false` if it was
    /// already closed.
    pub fn close(&self) -> bool {
        self.tx.lock().take().is_some()
    }

    /// Whether `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.lock().is_none()
    }

    /// Closed and holding no buffered jobs.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.is_closed() && self.rx.is_empty()
    }

    /// Number of buffered jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no jobs are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Buffer size fixed at construction.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobQueue")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
