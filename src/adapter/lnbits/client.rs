//! LNbits REST API client.
//!
//! Serves three concerns against one backend:
//! - wallet balance (`/api/v1/wallet`, invoice key in `X-Api-Key`)
//! - pay-link discovery (`/lnurlp/api/v1/links`), skipped entirely when a
//!   static LNURL-pay identifier is configured
//! - fiat exchange rate (`/api/v1/rate/{currency}`)
//!
//! All transport errors are converted to [`PollError`] here; callers never
//! see a raw `reqwest` failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::{PayLink, RateResponse, WalletDetails};
use crate::config::Config;
use crate::domain::{ExchangeRate, Sats};
use crate::error::PollError;
use crate::port::{RateSource, WalletBackend};

/// HTTP client for an LNbits instance.
pub struct LnbitsClient {
    http: HttpClient,
    /// Base URL, e.g. `https://legend.lnbits.com:443`.
    base_url: String,
    invoice_key: String,
    /// Statically configured LNURL-pay identifier, if any.
    static_lnurlp: Option<String>,
}

impl LnbitsClient {
    /// Create a client with default timeouts.
    #[must_use]
    pub fn new(base_url: String, invoice_key: String) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
            invoice_key,
            static_lnurlp: None,
        }
    }

    /// Build a client from the application configuration, applying the
    /// configured request and connect timeouts.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.polling.timeout_ms))
            .connect_timeout(Duration::from_millis(config.polling.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.backend.api_base(),
            invoice_key: config.backend.invoice_key.clone(),
            static_lnurlp: config.backend.lnurlp.clone(),
        }
    }

    async fn get_json<T>(&self, url: &str, authed: bool) -> Result<T, PollError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut request = self.http.get(url);
        if authed {
            request = request.header("X-Api-Key", &self.invoice_key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| PollError::from_transport(&err))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(PollError::BackendAuth(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(PollError::BackendUnreachable(format!("HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| PollError::BackendMalformed(err.to_string()))
    }
}

#[async_trait]
impl WalletBackend for LnbitsClient {
    async fn fetch_balance(&self) -> Result<Sats, PollError> {
        let url = format!("{}/api/v1/wallet", self.base_url);
        let details: WalletDetails = self.get_json(&url, true).await?;

        // Wire unit is millisatoshi.
        let sats = Sats::from_msat(details.balance);
        debug!(
            wallet = details.name.as_deref().unwrap_or("unnamed"),
            sats = sats.value(),
            "Fetched wallet balance"
        );
        Ok(sats)
    }

    async fn resolve_pay_address(&self) -> Result<Option<String>, PollError> {
        if let Some(lnurlp) = &self.static_lnurlp {
            debug!("Using static LNURL-pay identifier");
            return Ok(Some(lnurlp.clone()));
        }

        let url = format!("{}/lnurlp/api/v1/links", self.base_url);
        let links: Vec<PayLink> = self.get_json(&url, true).await?;
        Ok(links.into_iter().find_map(|link| link.lnurl))
    }

    fn backend_name(&self) -> &'static str {
        "LNbits"
    }
}

#[async_trait]
impl RateSource for LnbitsClient {
    async fn fetch_rate(&self, currency: &str) -> Result<ExchangeRate, PollError> {
        let url = format!("{}/api/v1/rate/{}", self.base_url, currency);
        let response: RateResponse = self.get_json(&url, false).await?;

        if response.rate <= rust_decimal::Decimal::ZERO {
            return Err(PollError::BackendMalformed(format!(
                "non-positive exchange rate: {}",
                response.rate
            )));
        }

        debug!(currency, rate = %response.rate, "Fetched exchange rate");
        Ok(ExchangeRate::new(currency, response.rate))
    }
}
