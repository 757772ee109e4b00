#![allow(dead_code)]

//! Shared test support: scripted port implementations and config helpers.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use satwatch::config::Config;
use satwatch::domain::{BalanceSnapshot, ExchangeRate, Sats};
use satwatch::error::PollError;
use satwatch::port::{RateSource, Screen, WalletBackend};

/// A wallet backend that serves a scripted sequence of results, then
/// repeats the last configured fallback balance.
pub struct ScriptedWallet {
    script: Mutex<VecDeque<Result<Sats, PollError>>>,
    fallback: i64,
}

impl ScriptedWallet {
    pub fn new(script: Vec<Result<Sats, PollError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback: 1_000,
        })
    }

    pub fn unreachable() -> Result<Sats, PollError> {
        Err(PollError::BackendUnreachable("connect refused".into()))
    }
}

#[async_trait]
impl WalletBackend for ScriptedWallet {
    async fn fetch_balance(&self) -> Result<Sats, PollError> {
        self.script
            .lock()
            .pop_front()
            .unwrap_or(Ok(Sats::new(self.fallback)))
    }

    async fn resolve_pay_address(&self) -> Result<Option<String>, PollError> {
        Ok(None)
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

/// A rate source serving one fixed rate.
pub struct FixedRates {
    pub rate: Decimal,
}

impl FixedRates {
    pub fn new(rate: Decimal) -> Arc<Self> {
        Arc::new(Self { rate })
    }
}

#[async_trait]
impl RateSource for FixedRates {
    async fn fetch_rate(&self, currency: &str) -> Result<ExchangeRate, PollError> {
        Ok(ExchangeRate::new(currency, self.rate))
    }
}

/// A screen that records every balance render.
#[derive(Default)]
pub struct RecordingScreen {
    renders: Mutex<Vec<(i64, bool)>>,
}

impl RecordingScreen {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All `(sats, stale)` pairs rendered so far.
    pub fn renders(&self) -> Vec<(i64, bool)> {
        self.renders.lock().clone()
    }
}

impl Screen for RecordingScreen {
    fn boot(&self) {}
    fn slogan(&self, _prelude: Option<&str>, _text: &str) {}

    fn balance(&self, snapshot: &BalanceSnapshot, stale: bool) {
        self.renders.lock().push((snapshot.sats.value(), stale));
    }

    fn receive_address(&self, _address: &str) {}
    fn halted(&self, _message: &str) {}
}

/// A minimal valid configuration with fast test timings.
pub fn test_config() -> Config {
    let mut config = Config::parse_toml(
        r#"
[wifi]
ssid = "piggy-net"

[backend]
host = "legend.lnbits.com"
port = 443
invoice_key = "test-key"
"#,
    )
    .expect("test config must be valid");

    config.polling.slogan_secs = 0;
    config.backoff.initial_delay_ms = 1;
    config.backoff.max_delay_ms = 10;
    config
}
