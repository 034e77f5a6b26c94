//! Per-command, per-user cooldown bookkeeping.

use crate::tasks::TaskQueue;
use dashmap::DashMap;
use reactbot_common::UserId;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Tracks when each `(command, user)` pair may run a command again.
///
/// Entries are removed by a deferred task at expiry, but reads never trust
/// the timer: an entry at or past its expiry counts as absent even before
/// cleanup fires.
pub struct CooldownTracker {
    entries: Arc<DashMap<(String, UserId), Instant>>,
    tasks: TaskQueue,
}

impl CooldownTracker {
    /// Creates a tracker whose expiry tasks run on the given queue.
    #[must_use]
    pub fn new(tasks: TaskQueue) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            tasks,
        }
    }

    /// Puts `(command, user)` on cooldown for `duration`, overwriting any
    /// prior entry for the pair.
    pub fn arm(&self, command: &str, user: UserId, duration: Duration) {
        let key = (command.to_string(), user);
        let expiry = Instant::now() + duration;
        self.entries.insert(key.clone(), expiry);

        let entries = Arc::clone(&self.entries);
        self.tasks.defer(duration, async move {
            // A re-arm may have pushed the expiry out; only drop entries
            // that are actually due.
            entries.remove_if(&key, |_, armed| *armed <= Instant::now());
        });
    }

    /// Time left on the cooldown for `(command, user)`, or `None` when the
    /// pair is not cooling down. Purely time-based.
    #[must_use]
    pub fn remaining(&self, command: &str, user: UserId) -> Option<Duration> {
        let key = (command.to_string(), user);
        let expiry = *self.entries.get(&key)?;
        let now = Instant::now();
        (expiry > now).then(|| expiry - now)
    }
}
