//! Screen port: everything the user sees.

use crate::domain::BalanceSnapshot;

/// Output surface for the balance display.
///
/// Rendering is local and synchronous; implementations must not block on
/// network I/O. The engine guarantees renders never interleave with a poll
/// that could replace the snapshot being drawn.
pub trait Screen: Send + Sync {
    /// Boot banner, shown once at startup.
    fn boot(&self);

    /// Boot slogan with its optional prelude line.
    fn slogan(&self, prelude: Option<&str>, text: &str);

    /// The balance panel. `stale` marks a cached snapshot shown while the
    /// backend is unreachable.
    fn balance(&self, snapshot: &BalanceSnapshot, stale: bool);

    /// The LNURL-pay receive identifier, shown once it is known.
    fn receive_address(&self, address: &str);

    /// Fatal configuration failure. Terminal; requires operator
    /// intervention.
    fn halted(&self, message: &str);
}

/// A no-op screen for tests or headless operation.
pub struct NullScreen;

impl Screen for NullScreen {
    fn boot(&self) {}
    fn slogan(&self, _prelude: Option<&str>, _text: &str) {}
    fn balance(&self, _snapshot: &BalanceSnapshot, _stale: bool) {}
    fn receive_address(&self, _address: &str) {}
    fn halted(&self, _message: &str) {}
}
