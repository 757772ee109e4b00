//! Device clock with remote synchronization and local fallback.

use std::time::Instant;

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, Utc};

/// Wall clock for a device that cannot keep time across power cycles.
///
/// One successful time sync anchors a remote timestamp to a monotonic
/// instant; `now` then advances from that anchor. Before any sync (or when
/// sync keeps failing) the system clock is used as-is, so timestamps stay
/// best-effort instead of blocking the display.
#[derive(Debug, Clone)]
pub struct DeviceClock {
    anchor: Option<(DateTime<FixedOffset>, Instant)>,
}

impl DeviceClock {
    /// Create an unsynchronized clock.
    #[must_use]
    pub fn new() -> Self {
        Self { anchor: None }
    }

    /// Anchor the clock to a remote timestamp.
    pub fn sync(&mut self, now: DateTime<FixedOffset>) {
        self.anchor = Some((now, Instant::now()));
    }

    /// Whether a sync has succeeded since startup.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current time: the synced anchor advanced by monotonic elapsed time,
    /// or the local system clock when never synced.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        match &self.anchor {
            Some((anchored, at)) => {
                let elapsed = ChronoDuration::from_std(at.elapsed())
                    .unwrap_or_else(|_| ChronoDuration::zero());
                *anchored + elapsed
            }
            None => Utc::now().fixed_offset(),
        }
    }
}

impl Default for DeviceClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsynced_clock_falls_back_to_system_time() {
        let clock = DeviceClock::new();
        assert!(!clock.is_synced());

        let now = clock.now();
        let system = Utc::now().fixed_offset();
        assert!((system - now).num_seconds().abs() < 2);
    }

    #[test]
    fn synced_clock_serves_the_anchored_time() {
        let mut clock = DeviceClock::new();
        let anchored: DateTime<FixedOffset> = "2026-08-07T12:00:00+02:00".parse().unwrap();
        clock.sync(anchored);

        assert!(clock.is_synced());
        let now = clock.now();
        assert!(now >= anchored);
        assert!((now - anchored).num_seconds() < 2);
        assert_eq!(now.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn synced_clock_advances_monotonically() {
        let mut clock = DeviceClock::new();
        clock.sync("2026-08-07T12:00:00+02:00".parse().unwrap());

        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = clock.now();
        assert!(second > first);
    }
}
