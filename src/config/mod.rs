//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct, loaded once at startup and never
//! mutated afterwards. Configuration comes from a TOML file with an
//! environment variable override (`SATWATCH_INVOICE_KEY`) for the backend
//! credential.
//!
//! Installer tooling templates string fields with `REPLACETHISBY...`
//! placeholders; any field still carrying that sentinel is treated as
//! absent, not as a literal value. Detection is centralized here so the
//! rest of the crate only ever sees typed, validated settings.
//!
//! # Example
//!
//! ```no_run
//! use satwatch::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("satwatch.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod polling;

use serde::{Deserialize, Deserializer};
use std::path::Path;
use url::Url;

use crate::error::{ConfigError, Result};
pub use logging::LoggingConfig;
pub use polling::{BackoffConfig, PollingConfig};

/// Sentinel prefix left behind by the installer when a field was never
/// filled in.
const PLACEHOLDER_PREFIX: &str = "REPLACETHISBY";

/// Fallback thousands separator when none is configured.
pub const DEFAULT_THOUSANDS_SEPARATOR: &str = ",";

/// Fallback decimal separator when none is configured.
pub const DEFAULT_DECIMAL_SEPARATOR: &str = ".";

/// Treat a string field as configured only if it is non-empty and not an
/// installer placeholder.
fn configured(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with(PLACEHOLDER_PREFIX) {
        None
    } else {
        Some(trimmed)
    }
}

/// Wireless network credentials.
///
/// Association itself is handled outside this crate; the config store still
/// owns and validates the fields.
#[derive(Debug, Default, Deserialize)]
pub struct WifiConfig {
    #[serde(default)]
    pub ssid: String,
    /// Empty for an open network.
    #[serde(default)]
    pub password: String,
}

/// LNbits payment backend settings.
#[derive(Debug, Default, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    /// Invoice/read key for the wallet. Loaded from `SATWATCH_INVOICE_KEY`
    /// when set, so the credential can stay out of the config file.
    #[serde(default)]
    pub invoice_key: String,
    /// Static LNURL-pay identifier. When set it disambiguates among
    /// multiple pay links and saves a lookup call at boot.
    #[serde(default)]
    pub lnurlp: Option<String>,
}

impl BackendConfig {
    /// Base URL of the backend REST API.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

/// Update-check settings. The updater itself is an external collaborator;
/// only the hostname lives here.
#[derive(Debug, Deserialize)]
pub struct UpdateConfig {
    #[serde(default = "default_update_host")]
    pub check_host: String,
}

fn default_update_host() -> String {
    "m.lightningpiggy.com".into()
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            check_host: default_update_host(),
        }
    }
}

/// Fiat conversion settings.
#[derive(Debug, Default, Deserialize)]
pub struct FiatConfig {
    /// ISO currency code (e.g. `USD`, `EUR`, `DKK`). When absent, no fiat
    /// value is shown and no exchange-rate requests are made at all.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Remote time service settings.
#[derive(Debug, Deserialize)]
pub struct TimeConfig {
    #[serde(default = "default_time_host")]
    pub server_host: String,
    /// The timezone is appended to this path, e.g.
    /// `/api/timezone/Europe/Copenhagen`.
    #[serde(default = "default_time_path")]
    pub server_path: String,
    /// IANA timezone name. When absent, time sync is skipped and the local
    /// clock is used as-is.
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_time_host() -> String {
    "worldtimeapi.org".into()
}

fn default_time_path() -> String {
    "/api/timezone/".into()
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            server_host: default_time_host(),
            server_path: default_time_path(),
            timezone: None,
        }
    }
}

impl TimeConfig {
    /// Full URL of the time endpoint for the configured timezone, if any.
    #[must_use]
    pub fn endpoint(&self) -> Option<String> {
        self.timezone
            .as_deref()
            .map(|tz| format!("https://{}{}{}", self.server_host, self.server_path, tz))
    }
}

/// Locale-dependent number formatting settings.
#[derive(Debug, Deserialize)]
pub struct FormatConfig {
    /// ISO 639 language code, optionally with territory (`da_DK`). Only
    /// informational; grouping behavior is driven by the separators below.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "default_thousands")]
    pub thousands_separator: String,
    #[serde(default = "default_decimal")]
    pub decimal_separator: String,
}

fn default_thousands() -> String {
    DEFAULT_THOUSANDS_SEPARATOR.into()
}

fn default_decimal() -> String {
    DEFAULT_DECIMAL_SEPARATOR.into()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            locale: None,
            thousands_separator: default_thousands(),
            decimal_separator: default_decimal(),
        }
    }
}

/// Boot slogan settings.
#[derive(Debug, Default, Deserialize)]
pub struct SloganConfig {
    /// A bit of text shown before the slogan itself.
    #[serde(default)]
    pub prelude: Option<String>,
    /// Installers template this as the string `"YES"`; a plain TOML bool is
    /// accepted too.
    #[serde(default, deserialize_with = "de_yes_no")]
    pub show_at_boot: bool,
}

/// Accept either a TOML boolean or the original `"YES"`/`"NO"` strings.
fn de_yes_no<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YesNo {
        Flag(bool),
        Text(String),
    }

    Ok(match YesNo::deserialize(deserializer)? {
        YesNo::Flag(flag) => flag,
        YesNo::Text(text) => text.trim().eq_ignore_ascii_case("yes"),
    })
}

/// Accept either a TOML integer or a numeric string (installers template
/// the bias as text). Placeholders and empty strings mean zero.
fn de_bias<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bias {
        Number(i64),
        Text(String),
    }

    match Bias::deserialize(deserializer)? {
        Bias::Number(n) => Ok(n),
        Bias::Text(text) => match configured(&text) {
            None => Ok(0),
            Some(t) => t.parse::<i64>().map_err(|_| {
                serde::de::Error::custom(format!("balance_bias is not an integer: {t:?}"))
            }),
        },
    }
}

/// Main application configuration.
///
/// Aggregates all settings for the daemon. Load from a TOML file with
/// [`Config::load`] or parse directly with [`Config::parse_toml`]. The
/// value is immutable after construction and passed explicitly to every
/// component that needs it.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wifi: WifiConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub update: UpdateConfig,

    #[serde(default)]
    pub fiat: FiatConfig,

    #[serde(default)]
    pub time: TimeConfig,

    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub slogan: SloganConfig,

    /// Satoshis added to every raw backend balance before display or fiat
    /// conversion. May be negative, e.g. to account for funds moved to cold
    /// storage; the displayed result may legitimately go below zero.
    #[serde(default, deserialize_with = "de_bias")]
    pub balance_bias: i64,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub backoff: BackoffConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// The invoice key is overridden from the `SATWATCH_INVOICE_KEY`
    /// environment variable when present. Placeholder sentinels are
    /// normalized to absence before validation runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a mandatory field is
    /// still unset or a placeholder, or a value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(key) = std::env::var("SATWATCH_INVOICE_KEY") {
            config.backend.invoice_key = key;
        }

        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the content fails
    /// [`Config::parse_toml`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Collapse placeholder sentinels into proper absence and apply the
    /// documented separator fallbacks.
    fn normalize(&mut self) {
        if configured(&self.wifi.password).is_none() {
            self.wifi.password.clear();
        }

        self.backend.lnurlp = self
            .backend
            .lnurlp
            .take()
            .and_then(|v| configured(&v).map(str::to_owned));

        self.fiat.currency = self
            .fiat
            .currency
            .take()
            .and_then(|v| configured(&v).map(|c| c.to_ascii_uppercase()));

        self.time.timezone = self
            .time
            .timezone
            .take()
            .and_then(|v| configured(&v).map(str::to_owned));

        self.format.locale = self
            .format
            .locale
            .take()
            .and_then(|v| configured(&v).map(str::to_owned));

        self.slogan.prelude = self
            .slogan
            .prelude
            .take()
            .and_then(|v| configured(&v).map(str::to_owned));

        if configured(&self.format.thousands_separator).is_none() {
            self.format.thousands_separator = default_thousands();
        }
        if configured(&self.format.decimal_separator).is_none() {
            self.format.decimal_separator = default_decimal();
        }
    }

    /// Validate configuration values.
    ///
    /// Mandatory fields (ssid, backend host, backend port, invoice key)
    /// must be configured; numeric settings must be within acceptable
    /// ranges.
    fn validate(&self) -> Result<()> {
        if configured(&self.wifi.ssid).is_none() {
            return Err(ConfigError::MissingField { field: "wifi.ssid" }.into());
        }
        if configured(&self.backend.host).is_none() {
            return Err(ConfigError::MissingField {
                field: "backend.host",
            }
            .into());
        }
        if self.backend.port == 0 {
            return Err(ConfigError::MissingField {
                field: "backend.port",
            }
            .into());
        }
        if configured(&self.backend.invoice_key).is_none() {
            return Err(ConfigError::MissingField {
                field: "backend.invoice_key",
            }
            .into());
        }
        if Url::parse(&self.backend.api_base()).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "backend.host",
                reason: "does not form a valid URL".to_string(),
            }
            .into());
        }

        if let Some(currency) = self.fiat.currency.as_deref() {
            if currency.len() < 2
                || currency.len() > 5
                || !currency.chars().all(|c| c.is_ascii_alphabetic())
            {
                return Err(ConfigError::InvalidValue {
                    field: "fiat.currency",
                    reason: format!("not an ISO currency code: {currency:?}"),
                }
                .into());
            }
        }

        if let Some(endpoint) = self.time.endpoint() {
            if Url::parse(&endpoint).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "time.timezone",
                    reason: "does not form a valid time server URL".to_string(),
                }
                .into());
            }
        }

        if self.polling.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.polling.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.polling.rate_refresh_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_refresh_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.backoff.initial_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_delay_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.backoff.max_delay_ms < self.backoff.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be >= initial_delay_ms".to_string(),
            }
            .into());
        }
        if self.backoff.multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "multiplier",
                reason: "must be >= 1.0".to_string(),
            }
            .into());
        }
        if self.backoff.max_consecutive_failures == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_consecutive_failures",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.backoff.cooldown_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cooldown_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// True when a fiat currency is configured and conversion should run.
    #[must_use]
    pub fn fiat_enabled(&self) -> bool {
        self.fiat.currency.is_some()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
