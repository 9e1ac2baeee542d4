//! Deferred task spawners used for delayed scheduling.

pub mod thread_spawner;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use thread_spawner::ThreadSpawner;
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;

use std::time::Duration;

/// Abstraction over whatever runs a task after a delay.
///
/// Implementations must return without waiting for `delay`, and must run
/// `task` where it is allowed to block: a delayed job submission can wait on
/// a full queue.
pub trait Spawn {
    /// Arrange for `task` to run once `delay` has elapsed.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the timer cannot be started.
    fn spawn_after<F>(&self, delay: Duration, task: F) -> std::io::Result<()>
    where
        F: FnOnce() + Send + 'static;
}
