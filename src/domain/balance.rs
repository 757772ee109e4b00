//! Wallet balance types.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

/// Satoshi amount - newtype for type safety.
///
/// Signed: a configured balance bias may push the displayed amount below
/// zero, which is real accounting intent and must not be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sats(i64);

impl Sats {
    /// Create a new `Sats` amount.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Convert a millisatoshi figure (LNbits wire unit) to whole satoshis.
    ///
    /// Truncates toward zero; sub-satoshi precision is not displayable.
    #[must_use]
    pub const fn from_msat(msat: i64) -> Self {
        Self(msat / 1000)
    }

    /// The raw satoshi count.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Apply the configured balance bias.
    ///
    /// Plain integer addition; the result is exact and may be negative.
    #[must_use]
    pub const fn with_bias(self, bias: i64) -> Self {
        Self(self.0 + bias)
    }
}

impl fmt::Display for Sats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Sats {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl Add for Sats {
    type Output = Sats;

    fn add(self, rhs: Sats) -> Sats {
        Sats(self.0 + rhs.0)
    }
}

impl Sub for Sats {
    type Output = Sats;

    fn sub(self, rhs: Sats) -> Sats {
        Sats(self.0 - rhs.0)
    }
}

/// One successfully completed balance poll.
///
/// Snapshots are replaced whole, never merged; the engine holds at most one
/// current snapshot and only the poll-success path may produce a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    /// Satoshi balance with the configured bias already applied.
    pub sats: Sats,
    /// Fiat equivalent. Absent when no fiat currency is configured or no
    /// exchange rate has been obtained yet.
    pub fiat: Option<Decimal>,
    /// When the poll completed, in device-local time.
    pub fetched_at: DateTime<FixedOffset>,
}

impl BalanceSnapshot {
    /// Create a new snapshot.
    #[must_use]
    pub fn new(sats: Sats, fiat: Option<Decimal>, fetched_at: DateTime<FixedOffset>) -> Self {
        Self {
            sats,
            fiat,
            fetched_at,
        }
    }
}
