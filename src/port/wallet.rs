//! Wallet backend port.

use async_trait::async_trait;

use crate::domain::Sats;
use crate::error::PollError;

/// A payment backend that can report the wallet balance.
///
/// Implementations convert their transport errors into [`PollError`]
/// variants at this boundary; the state machine never sees raw HTTP
/// failures.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// Fetch the current raw balance in satoshis, before any bias.
    async fn fetch_balance(&self) -> Result<Sats, PollError>;

    /// Resolve the LNURL-pay identifier for receiving funds.
    ///
    /// Returns `None` when the backend has no pay link configured. A
    /// statically configured identifier short-circuits the lookup.
    async fn resolve_pay_address(&self) -> Result<Option<String>, PollError>;

    /// Human-readable backend name for logging.
    fn backend_name(&self) -> &'static str;
}
