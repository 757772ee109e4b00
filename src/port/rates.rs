//! Exchange-rate source port.

use async_trait::async_trait;

use crate::domain::ExchangeRate;
use crate::error::PollError;

/// Source of BTC-to-fiat exchange rates.
///
/// Queried only when a fiat currency is configured, on its own refresh
/// interval.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the current rate for the given ISO currency code.
    async fn fetch_rate(&self, currency: &str) -> Result<ExchangeRate, PollError>;
}
