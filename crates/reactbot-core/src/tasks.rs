//! Deferred background work with a shutdown boundary.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Clonable handle over the bot's deferred tasks.
///
/// Cooldown expiry and transient-message deletion run through here rather
/// than as detached timers, so a graceful shutdown can cancel everything
/// still pending and wait for whatever already fired.
#[derive(Clone)]
pub struct TaskQueue {
    tracker: TaskTracker,
    token: CancellationToken,
}

impl TaskQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: TaskTracker::new(),
            token: CancellationToken::new(),
        }
    }

    /// Runs `job` after `delay`, unless the queue shuts down first. Jobs
    /// that have already started are not interrupted.
    ///
    /// The deadline is anchored at the call, not at the spawned task's
    /// first poll.
    pub fn defer<F>(&self, delay: Duration, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let deadline = tokio::time::Instant::now() + delay;
        let token = self.token.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep_until(deadline) => job.await,
            }
        });
    }

    /// Cancels all pending delays and waits for in-flight jobs to finish.
    pub async fn shutdown(&self) {
        self.token.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
