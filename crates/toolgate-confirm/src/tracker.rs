//! Presentation-level aggregation of invocations awaiting a decision.

use std::collections::HashSet;
use std::fmt;
use std::sync::RwLock;

use tokio::sync::watch;

use toolgate_core::InvocationId;

/// Tracks which invocations are currently in `Waiting`.
///
/// A delegated sub-agent session runs its own invocations against the same
/// engine; the parent only needs this set (and its size) to render "N tool
/// calls awaiting approval". An id is added when an invocation enters
/// `Waiting` and removed as soon as its outcome settles, whether by
/// decision or cancellation.
pub struct WaitingTracker {
    waiting: RwLock<HashSet<InvocationId>>,
    count_tx: watch::Sender<usize>,
}

impl WaitingTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        let (count_tx, _) = watch::channel(0);
        Self {
            waiting: RwLock::new(HashSet::new()),
            count_tx,
        }
    }

    /// Record that an invocation entered `Waiting`.
    pub fn mark_waiting(&self, id: InvocationId) {
        let mut waiting = self.waiting.write().unwrap_or_else(|e| {
            tracing::warn!("WaitingTracker lock poisoned, recovering");
            e.into_inner()
        });
        waiting.insert(id);
        self.count_tx.send_replace(waiting.len());
    }

    /// Record that an invocation's outcome settled.
    ///
    /// A no-op for invocations that never reached `Waiting`.
    pub fn mark_settled(&self, id: &InvocationId) {
        let mut waiting = self.waiting.write().unwrap_or_else(|e| {
            tracing::warn!("WaitingTracker lock poisoned, recovering");
            e.into_inner()
        });
        if waiting.remove(id) {
            self.count_tx.send_replace(waiting.len());
        }
    }

    /// Number of invocations currently awaiting a decision.
    #[must_use]
    pub fn count(&self) -> usize {
        self.waiting.read().map(|waiting| waiting.len()).unwrap_or(0)
    }

    /// Check whether a specific invocation is awaiting a decision.
    #[must_use]
    pub fn contains(&self, id: &InvocationId) -> bool {
        self.waiting
            .read()
            .map(|waiting| waiting.contains(id))
            .unwrap_or(false)
    }

    /// Subscribe to count changes for live presentation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count_tx.subscribe()
    }
}

impl Default for WaitingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WaitingTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitingTracker")
            .field("count", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_rises_and_falls() {
        let tracker = WaitingTracker::new();
        let id1 = InvocationId::new();
        let id2 = InvocationId::new();

        tracker.mark_waiting(id1.clone());
        tracker.mark_waiting(id2.clone());
        assert_eq!(tracker.count(), 2);
        assert!(tracker.contains(&id1));

        tracker.mark_settled(&id1);
        assert_eq!(tracker.count(), 1);
        assert!(!tracker.contains(&id1));
        assert!(tracker.contains(&id2));
    }

    #[test]
    fn test_settle_without_waiting_is_noop() {
        let tracker = WaitingTracker::new();
        tracker.mark_settled(&InvocationId::new());
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_subscribe_observes_changes() {
        let tracker = WaitingTracker::new();
        let rx = tracker.subscribe();
        assert_eq!(*rx.borrow(), 0);

        tracker.mark_waiting(InvocationId::new());
        assert_eq!(*rx.borrow(), 1);
    }
}
