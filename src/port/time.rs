//! Remote time source port.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::error::TimeSyncError;

/// A remote service that reports the current wall-clock time for the
/// configured timezone.
///
/// One request per call; retry policy belongs to the caller. A failure is
/// recoverable: the device clock degrades to local time.
#[async_trait]
pub trait TimeSource: Send + Sync {
    /// Fetch the current time, timezone offset included.
    async fn fetch_now(&self) -> Result<DateTime<FixedOffset>, TimeSyncError>;
}
