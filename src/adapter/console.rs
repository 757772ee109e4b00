//! Terminal implementation of the screen port.
//!
//! Stands in for the e-paper panel of the physical device: a handful of
//! lines on stdout, colored when the terminal supports it.

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::domain::{format_fiat, format_sats, BalanceSnapshot};
use crate::port::Screen;

/// Console screen with the configured separators and fiat currency.
pub struct ConsoleScreen {
    thousands: String,
    decimal: String,
    currency: Option<String>,
}

impl ConsoleScreen {
    /// Build a screen from the application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            thousands: config.format.thousands_separator.clone(),
            decimal: config.format.decimal_separator.clone(),
            currency: config.fiat.currency.clone(),
        }
    }
}

impl Default for ConsoleScreen {
    /// Fallback screen with default separators and no fiat line. Used to
    /// render the halted panel when configuration loading itself failed.
    fn default() -> Self {
        Self {
            thousands: crate::config::DEFAULT_THOUSANDS_SEPARATOR.into(),
            decimal: crate::config::DEFAULT_DECIMAL_SEPARATOR.into(),
            currency: None,
        }
    }
}

impl Screen for ConsoleScreen {
    fn boot(&self) {
        println!(
            "{} {}",
            "satwatch".bold(),
            format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
        );
    }

    fn slogan(&self, prelude: Option<&str>, text: &str) {
        println!();
        if let Some(prelude) = prelude {
            println!("{}", prelude.dimmed());
        }
        println!("  {}", text.italic());
        println!();
    }

    fn balance(&self, snapshot: &BalanceSnapshot, stale: bool) {
        let sats = format_sats(snapshot.sats, &self.thousands);
        let marker = if stale {
            format!(" {}", "(stale)".red())
        } else {
            String::new()
        };

        println!("{} {} sats{}", "⚡".yellow(), sats.bold(), marker);

        if let (Some(fiat), Some(currency)) = (snapshot.fiat, self.currency.as_deref()) {
            let amount = format_fiat(fiat, &self.thousands, &self.decimal);
            println!("  {}", format!("≈ {amount} {currency}").dimmed());
        }

        println!(
            "  {}",
            format!("as of {}", snapshot.fetched_at.format("%H:%M:%S")).dimmed()
        );
    }

    fn receive_address(&self, address: &str) {
        println!("  {} {}", "receive:".dimmed(), address.cyan());
    }

    fn halted(&self, message: &str) {
        eprintln!();
        eprintln!("{}", "CONFIGURATION ERROR".red().bold());
        eprintln!("  {message}");
        eprintln!("  {}", "fix the configuration and restart".dimmed());
    }
}
