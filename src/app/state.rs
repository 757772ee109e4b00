//! Shared application state.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::domain::BalanceSnapshot;

/// State shared between the poll engine and outside observers (the
/// shutdown path, diagnostics).
///
/// Only the poll-success transition replaces the snapshot; readers always
/// see a whole, successfully completed one or nothing.
pub struct AppState {
    /// Most recent successfully fetched snapshot.
    snapshot: RwLock<Option<BalanceSnapshot>>,
    /// Whether the current snapshot is being served stale (backend
    /// currently unreachable).
    stale: AtomicBool,
}

impl AppState {
    /// Create empty state: no snapshot yet, nothing stale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
            stale: AtomicBool::new(false),
        }
    }

    /// Publish a fresh snapshot, clearing staleness.
    pub fn publish(&self, snapshot: BalanceSnapshot) {
        *self.snapshot.write() = Some(snapshot);
        self.stale.store(false, Ordering::SeqCst);
    }

    /// Mark the current snapshot stale without replacing it.
    pub fn mark_stale(&self) {
        self.stale.store(true, Ordering::SeqCst);
    }

    /// Clone of the current snapshot, if any poll has succeeded yet.
    #[must_use]
    pub fn snapshot(&self) -> Option<BalanceSnapshot> {
        self.snapshot.read().clone()
    }

    /// Whether the current snapshot is stale.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sats;

    fn snapshot(sats: i64) -> BalanceSnapshot {
        BalanceSnapshot::new(Sats::new(sats), None, chrono::Utc::now().fixed_offset())
    }

    #[test]
    fn starts_empty_and_fresh() {
        let state = AppState::new();
        assert!(state.snapshot().is_none());
        assert!(!state.is_stale());
    }

    #[test]
    fn publish_replaces_whole_snapshot() {
        let state = AppState::new();
        state.publish(snapshot(100));
        state.publish(snapshot(250));

        assert_eq!(state.snapshot().unwrap().sats, Sats::new(250));
    }

    #[test]
    fn publish_clears_staleness() {
        let state = AppState::new();
        state.publish(snapshot(100));
        state.mark_stale();
        assert!(state.is_stale());

        state.publish(snapshot(200));
        assert!(!state.is_stale());
    }

    #[test]
    fn mark_stale_keeps_the_cached_snapshot() {
        let state = AppState::new();
        state.publish(snapshot(100));
        state.mark_stale();

        assert!(state.is_stale());
        assert_eq!(state.snapshot().unwrap().sats, Sats::new(100));
    }
}
