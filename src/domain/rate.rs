//! Exchange-rate type and sats-to-fiat conversion.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use super::balance::Sats;

const SATS_PER_BTC: i64 = 100_000_000;

/// One fetched BTC exchange rate.
///
/// Rates change far less often than balances, so they are refreshed on
/// their own interval and reused between refreshes. A rate that has gone
/// stale is still better than none; fiat display only goes absent when no
/// rate was ever obtained.
#[derive(Debug, Clone)]
pub struct ExchangeRate {
    /// ISO currency code this rate converts into.
    pub currency: String,
    /// Fiat units per whole BTC.
    pub rate: Decimal,
    /// When the rate was fetched.
    pub fetched_at: Instant,
}

impl ExchangeRate {
    /// Create a rate fetched just now.
    #[must_use]
    pub fn new(currency: impl Into<String>, rate: Decimal) -> Self {
        Self {
            currency: currency.into(),
            rate,
            fetched_at: Instant::now(),
        }
    }

    /// True while the rate is younger than the refresh interval.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() <= ttl
    }

    /// Convert a satoshi amount into this rate's fiat currency.
    ///
    /// `sats * rate / 1e8`, carried out in `Decimal` so no precision is
    /// lost on the way to display.
    #[must_use]
    pub fn fiat_value(&self, sats: Sats) -> Decimal {
        Decimal::from(sats.value()) * self.rate / Decimal::from(SATS_PER_BTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn one_btc_converts_at_the_rate() {
        let rate = ExchangeRate::new("USD", dec!(65000));
        assert_eq!(rate.fiat_value(Sats::new(100_000_000)), dec!(65000));
    }

    #[test]
    fn fractional_amounts_keep_precision() {
        let rate = ExchangeRate::new("EUR", dec!(60000));
        // 1234 sats at 60k EUR/BTC = 0.7404 EUR
        assert_eq!(rate.fiat_value(Sats::new(1234)), dec!(0.74040));
    }

    #[test]
    fn negative_balance_yields_negative_fiat() {
        let rate = ExchangeRate::new("USD", dec!(50000));
        assert_eq!(rate.fiat_value(Sats::new(-100_000_000)), dec!(-50000));
    }

    #[test]
    fn freshness_respects_ttl() {
        let fresh = ExchangeRate::new("USD", dec!(65000));
        assert!(fresh.is_fresh(Duration::from_secs(300)));

        let stale = ExchangeRate {
            fetched_at: Instant::now() - Duration::from_secs(600),
            ..ExchangeRate::new("USD", dec!(65000))
        };
        assert!(!stale.is_fresh(Duration::from_secs(300)));
    }
}
