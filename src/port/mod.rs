//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the extension points adapters implement to integrate with
//! external collaborators: the payment backend, the exchange-rate source,
//! the remote time service, and the physical screen.
//!
//! # Available Ports
//!
//! - [`WalletBackend`] - balance and pay-address queries
//! - [`RateSource`] - BTC exchange rates
//! - [`TimeSource`] - remote wall-clock time
//! - [`Screen`] - everything the user sees

mod rates;
mod screen;
mod time;
mod wallet;

pub use rates::RateSource;
pub use screen::{NullScreen, Screen};
pub use time::TimeSource;
pub use wallet::WalletBackend;
