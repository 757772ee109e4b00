//! Diagnostic checks for `satwatch check`.
//!
//! Probes each configured collaborator once and reports the results;
//! returns whether everything essential passed so the CLI can set its
//! exit code.

use owo_colors::OwoColorize;

use crate::adapter::lnbits::LnbitsClient;
use crate::adapter::worldtime::WorldTimeClient;
use crate::config::Config;
use crate::port::{RateSource, TimeSource, WalletBackend};

fn pass(what: &str, detail: &str) {
    println!("{} {what}: {detail}", "✓".green());
}

fn fail(what: &str, detail: &str) {
    println!("{} {what}: {detail}", "✗".red());
}

fn skip(what: &str, detail: &str) {
    println!("{} {what}: {detail}", "-".dimmed());
}

/// Run all diagnostics. Returns `true` when the essential checks (backend
/// reachability and, if configured, the rate endpoint) pass; time sync is
/// advisory since the daemon degrades gracefully without it.
pub async fn run_checks(config: &Config) -> bool {
    pass("configuration", "valid");

    let client = LnbitsClient::from_config(config);
    let mut ok = true;

    match client.fetch_balance().await {
        Ok(sats) => pass(
            "backend",
            &format!("reachable, balance {} sats (pre-bias)", sats),
        ),
        Err(err) => {
            fail("backend", &err.to_string());
            ok = false;
        }
    }

    match config.fiat.currency.as_deref() {
        Some(currency) => match client.fetch_rate(currency).await {
            Ok(rate) => pass("exchange rate", &format!("1 BTC = {} {currency}", rate.rate)),
            Err(err) => {
                fail("exchange rate", &err.to_string());
                ok = false;
            }
        },
        None => skip("exchange rate", "no fiat currency configured"),
    }

    match WorldTimeClient::from_config(config) {
        Some(time_client) => match time_client.fetch_now().await {
            Ok(now) => pass("time server", &format!("reports {now}")),
            Err(err) => fail("time server", &format!("{err} (daemon falls back to local clock)")),
        },
        None => skip("time server", "no timezone configured"),
    }

    ok
}
