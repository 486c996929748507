//! Simulated processing delays.
//!
//! Every delayed callback runs in a Tokio task owned by a [`DelayedTask`]
//! handle. Dropping or cancelling the handle aborts the task, so a callback
//! never fires after its owner is gone. Spawning needs a running Tokio runtime.

use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    pub fn spawn<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Pending delayed tasks belonging to one owner.
#[derive(Debug, Default)]
pub struct DelayedTasks {
    tasks: Vec<DelayedTask>,
}

impl DelayedTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(DelayedTask::spawn(delay, callback));
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            debug!("Cancelling {} pending delayed task(s)", self.tasks.len());
        }
        // dropping aborts
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

/// Waits out an artificial "thinking" delay.
pub async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
