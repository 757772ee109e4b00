//! Poll engine and display state machine.
//!
//! One logical task drives everything in turn: time sync at boot, balance
//! polls, exchange-rate refreshes, and screen renders. Network awaits are
//! the only suspension points, so a render can never observe a snapshot
//! that is still being fetched.
//!
//! Failed polls move the engine into a retrying phase with exponential
//! backoff, capped at a maximum delay, with a longer cooldown once too
//! many consecutive attempts have failed. The first success resets the
//! backoff and returns to steady display. Throughout retrying the cached
//! snapshot stays on screen, flagged stale.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::state::AppState;
use crate::config::Config;
use crate::domain::{pick_slogan, BalanceSnapshot, DeviceClock, ExchangeRate};
use crate::error::{PollError, Result};
use crate::port::{RateSource, Screen, TimeSource, WalletBackend};

/// Live phases of the display state machine.
///
/// The halted state is terminal and handled before the engine exists: a
/// configuration failure renders a fatal panel and the loop never starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    /// Startup: time sync, pay-address resolution, optional slogan.
    Booting,
    /// The boot slogan is on screen.
    ShowingSlogan,
    /// Polling at the steady interval, rendering fresh snapshots.
    Steady,
    /// Polls are failing; cached snapshot shown stale, backoff between
    /// attempts.
    Retrying,
}

/// The balance poll engine.
///
/// Owns the device clock, the cached exchange rate, and the backoff
/// state. Collaborators are reached through ports so the engine can be
/// driven against scripted implementations in tests.
pub struct PollEngine {
    config: Arc<Config>,
    wallet: Arc<dyn WalletBackend>,
    rates: Arc<dyn RateSource>,
    time_source: Option<Arc<dyn TimeSource>>,
    screen: Arc<dyn Screen>,
    state: Arc<AppState>,
    clock: DeviceClock,
    phase: DisplayPhase,
    /// Cached exchange rate, reused between refreshes and across rate
    /// fetch failures.
    rate: Option<ExchangeRate>,
    consecutive_failures: u32,
    current_delay_ms: u64,
}

impl PollEngine {
    /// Create an engine in the booting phase.
    pub fn new(
        config: Arc<Config>,
        wallet: Arc<dyn WalletBackend>,
        rates: Arc<dyn RateSource>,
        time_source: Option<Arc<dyn TimeSource>>,
        screen: Arc<dyn Screen>,
        state: Arc<AppState>,
    ) -> Self {
        let initial_delay = config.backoff.initial_delay_ms;
        Self {
            config,
            wallet,
            rates,
            time_source,
            screen,
            state,
            clock: DeviceClock::new(),
            phase: DisplayPhase::Booting,
            rate: None,
            consecutive_failures: 0,
            current_delay_ms: initial_delay,
        }
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    /// Run the boot sequence: banner, best-effort time sync, pay-address
    /// resolution, optional slogan. Ends in the steady phase; nothing
    /// here is fatal.
    pub async fn boot(&mut self) {
        self.screen.boot();

        match &self.time_source {
            Some(source) => match source.fetch_now().await {
                Ok(now) => {
                    self.clock.sync(now);
                    info!(now = %now, "Clock synchronized");
                }
                Err(err) => {
                    warn!(error = %err, "Time sync failed, continuing with local clock");
                }
            },
            None => debug!("No timezone configured, skipping time sync"),
        }

        match self.wallet.resolve_pay_address().await {
            Ok(Some(address)) => self.screen.receive_address(&address),
            Ok(None) => debug!("No pay link configured on the backend"),
            Err(err) => warn!(error = %err, "Pay address lookup failed"),
        }

        if self.config.slogan.show_at_boot {
            self.phase = DisplayPhase::ShowingSlogan;
            let seed = self.clock.now().timestamp().unsigned_abs();
            self.screen
                .slogan(self.config.slogan.prelude.as_deref(), pick_slogan(seed));
            sleep(Duration::from_secs(self.config.polling.slogan_secs)).await;
        }

        self.phase = DisplayPhase::Steady;
    }

    /// Run the engine forever: boot once, then poll and render until the
    /// surrounding task is cancelled.
    pub async fn run(&mut self) -> Result<()> {
        self.boot().await;

        loop {
            self.tick().await;

            let delay = match self.phase {
                DisplayPhase::Steady => Duration::from_secs(self.config.polling.interval_secs),
                _ => self.next_delay(),
            };
            sleep(delay).await;
        }
    }

    /// One poll cycle: fetch, publish and render on success, or fall back
    /// to the stale cached snapshot on failure.
    pub async fn tick(&mut self) {
        match self.poll_once().await {
            Ok(snapshot) => {
                if self.consecutive_failures > 0 {
                    info!(
                        failures = self.consecutive_failures,
                        "Backend recovered, resuming steady display"
                    );
                }
                self.reset_backoff();
                self.state.publish(snapshot.clone());
                self.screen.balance(&snapshot, false);
                self.phase = DisplayPhase::Steady;
            }
            Err(err) => {
                self.record_failure();
                warn!(
                    error = %err,
                    failures = self.consecutive_failures,
                    "Balance poll failed"
                );
                self.phase = DisplayPhase::Retrying;
                self.state.mark_stale();
                if let Some(cached) = self.state.snapshot() {
                    self.screen.balance(&cached, true);
                }
            }
        }
    }

    /// Fetch the raw balance, apply the bias, and attach a fiat value when
    /// a currency is configured.
    ///
    /// The bias is applied here and nowhere else, to the satoshi figure
    /// only; the fiat value is derived from the already-biased amount.
    async fn poll_once(&mut self) -> std::result::Result<BalanceSnapshot, PollError> {
        let raw = self.wallet.fetch_balance().await?;
        let sats = raw.with_bias(self.config.balance_bias);

        let fiat = match self.config.fiat.currency.clone() {
            None => None,
            Some(currency) => {
                self.refresh_rate(&currency).await;
                self.rate.as_ref().map(|rate| rate.fiat_value(sats))
            }
        };

        Ok(BalanceSnapshot::new(sats, fiat, self.clock.now()))
    }

    /// Re-fetch the exchange rate when the cached one has aged out.
    ///
    /// A fetch failure keeps the previous rate; fiat display only goes
    /// absent when no rate was ever obtained.
    async fn refresh_rate(&mut self, currency: &str) {
        let ttl = Duration::from_secs(self.config.polling.rate_refresh_secs);
        if self.rate.as_ref().is_some_and(|rate| rate.is_fresh(ttl)) {
            return;
        }

        match self.rates.fetch_rate(currency).await {
            Ok(rate) => {
                self.rate = Some(rate);
            }
            Err(err) => {
                warn!(error = %err, "Exchange rate fetch failed, reusing previous rate");
            }
        }
    }

    fn record_failure(&mut self) {
        self.consecutive_failures += 1;
    }

    /// Reset backoff state after a successful poll.
    fn reset_backoff(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay_ms = self.config.backoff.initial_delay_ms;
    }

    /// The delay before the next retry, advancing the backoff state.
    ///
    /// Doubles (per the configured multiplier) up to the cap; every
    /// `max_consecutive_failures` failures the longer cooldown applies
    /// instead, to spare the remote service and the battery.
    fn next_delay(&mut self) -> Duration {
        let backoff = &self.config.backoff;

        if self.consecutive_failures >= backoff.max_consecutive_failures
            && self.consecutive_failures % backoff.max_consecutive_failures == 0
        {
            error!(
                failures = self.consecutive_failures,
                cooldown_secs = backoff.cooldown_ms / 1000,
                "Backend still unreachable, cooling down"
            );
            return Duration::from_millis(backoff.cooldown_ms);
        }

        let delay = Duration::from_millis(self.current_delay_ms);
        let next = (self.current_delay_ms as f64 * backoff.multiplier) as u64;
        self.current_delay_ms = next.min(backoff.max_delay_ms);
        delay
    }
}
