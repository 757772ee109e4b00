//! Wire types for the LNbits REST API.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response of `GET /api/v1/wallet`.
///
/// LNbits reports the balance in millisatoshis.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletDetails {
    #[serde(default)]
    pub name: Option<String>,
    pub balance: i64,
}

/// One entry of `GET /lnurlp/api/v1/links`.
///
/// Only the LNURL identifier matters here; the rest of the pay-link
/// metadata is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PayLink {
    #[serde(default)]
    pub lnurl: Option<String>,
}

/// Response of `GET /api/v1/rate/{currency}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateResponse {
    pub rate: Decimal,
}
