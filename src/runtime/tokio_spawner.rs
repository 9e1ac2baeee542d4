//! Tokio runtime spawner implementation.

use std::sync::Arc;
use std::time::Duration;

use super::Spawn;

/// Tokio-based spawner: the delay is a tokio timer, the task itself runs on
/// the runtime's blocking pool since it may wait on a full queue.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: Arc<tokio::runtime::Handle>,
}

impl TokioSpawner {
    /// Create a `TokioSpawner` from a tokio runtime handle.
    ///
    /// The runtime must have its time driver enabled.
    #[must_use]
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Create a `TokioSpawner` for the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a tokio runtime.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        tokio::runtime::Handle::try_current().map(Self::new)
    }
}

impl Spawn for TokioSpawner {
    fn spawn_after<F>(&self, delay: Duration, task: F) -> std::io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = Arc::clone(&self.handle);
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = handle.spawn_blocking(task).await {
                tracing::error!(error = %e, "Delayed task failed");
            }
        });
        Ok(())
    }
}

impl std::fmt::Debug for TokioSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioSpawner").finish_non_exhaustive()
    }
}
