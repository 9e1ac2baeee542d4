//! One OS thread per delayed task.

use std::thread;
use std::time::Duration;

use super::Spawn;

/// Spawner that parks a dedicated thread for the duration of each delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSpawner;

impl Spawn for ThreadSpawner {
    fn spawn_after<F>(&self, delay: Duration, task: F) -> std::io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new()
            .name("ep-delay".into())
            .spawn(move || {
                thread::sleep(delay);
                task();
            })
            .map(drop)
    }
}
