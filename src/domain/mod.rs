//! Backend-agnostic domain logic.

mod balance;
mod clock;
mod format;
mod rate;
mod slogan;

// Core domain types
pub use balance::{BalanceSnapshot, Sats};
pub use clock::DeviceClock;
pub use rate::ExchangeRate;

// Locale-aware amount formatting
pub use format::{format_amount, format_fiat, format_sats};

// Boot slogans
pub use slogan::{pick_slogan, SLOGANS};
