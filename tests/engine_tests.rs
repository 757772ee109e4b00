//! End-to-end tests of the poll engine against scripted collaborators.

mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;

use satwatch::app::{AppState, DisplayPhase, PollEngine};
use satwatch::domain::Sats;

use support::{test_config, FixedRates, RecordingScreen, ScriptedWallet};

fn engine(
    config: satwatch::config::Config,
    wallet: Arc<ScriptedWallet>,
    screen: Arc<RecordingScreen>,
) -> (PollEngine, Arc<AppState>) {
    let state = Arc::new(AppState::new());
    let engine = PollEngine::new(
        Arc::new(config),
        wallet,
        FixedRates::new(dec!(65000)),
        None,
        screen,
        state.clone(),
    );
    (engine, state)
}

#[tokio::test]
async fn boot_then_poll_reaches_steady_display() {
    let wallet = ScriptedWallet::new(vec![Ok(Sats::new(42_000))]);
    let screen = RecordingScreen::new();
    let (mut engine, state) = engine(test_config(), wallet, screen.clone());

    engine.boot().await;
    assert_eq!(engine.phase(), DisplayPhase::Steady);

    engine.tick().await;
    assert_eq!(state.snapshot().unwrap().sats, Sats::new(42_000));
    assert_eq!(screen.renders(), vec![(42_000, false)]);
}

#[tokio::test]
async fn three_failures_then_recovery_round_trips_through_retrying() {
    let wallet = ScriptedWallet::new(vec![
        Ok(Sats::new(10_000)),
        ScriptedWallet::unreachable(),
        ScriptedWallet::unreachable(),
        ScriptedWallet::unreachable(),
        Ok(Sats::new(12_000)),
    ]);
    let screen = RecordingScreen::new();
    let (mut engine, state) = engine(test_config(), wallet, screen.clone());

    engine.boot().await;

    // Healthy poll, then three failures, then recovery.
    for _ in 0..5 {
        engine.tick().await;
    }

    assert_eq!(engine.phase(), DisplayPhase::Steady);
    assert!(!state.is_stale());
    assert_eq!(state.snapshot().unwrap().sats, Sats::new(12_000));

    // Every render during the outage showed the cached balance, stale.
    assert_eq!(
        screen.renders(),
        vec![
            (10_000, false),
            (10_000, true),
            (10_000, true),
            (10_000, true),
            (12_000, false),
        ]
    );
}

#[tokio::test]
async fn outage_before_any_success_renders_nothing() {
    let wallet = ScriptedWallet::new(vec![
        ScriptedWallet::unreachable(),
        ScriptedWallet::unreachable(),
    ]);
    let screen = RecordingScreen::new();
    let (mut engine, state) = engine(test_config(), wallet, screen.clone());

    engine.boot().await;
    engine.tick().await;
    engine.tick().await;

    assert_eq!(engine.phase(), DisplayPhase::Retrying);
    assert!(state.snapshot().is_none());
    assert!(screen.renders().is_empty());
}

#[tokio::test]
async fn fiat_appears_only_when_a_currency_is_configured() {
    let mut config = test_config();
    config.fiat.currency = Some("USD".into());

    let wallet = ScriptedWallet::new(vec![Ok(Sats::new(100_000_000))]);
    let screen = RecordingScreen::new();
    let (mut engine, state) = engine(config, wallet, screen);

    engine.boot().await;
    engine.tick().await;

    assert_eq!(state.snapshot().unwrap().fiat, Some(dec!(65000)));
}
