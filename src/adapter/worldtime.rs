//! Remote time service adapter (worldtimeapi.org style).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::TimeSyncError;
use crate::port::TimeSource;

/// Response of `GET /api/timezone/{area}/{location}`.
#[derive(Debug, Deserialize)]
struct TimeResponse {
    /// RFC 3339 timestamp including the timezone offset.
    datetime: String,
}

/// Client for a worldtime-style HTTP time service.
///
/// One request per [`TimeSource::fetch_now`] call; retries are the
/// caller's concern.
pub struct WorldTimeClient {
    http: HttpClient,
    /// Full endpoint URL with the timezone already appended.
    endpoint: String,
}

impl WorldTimeClient {
    /// Create a client for the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint,
        }
    }

    /// Build a client from the application configuration.
    ///
    /// Returns `None` when no timezone is configured, in which case time
    /// sync is skipped and the local clock is used.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        let endpoint = config.time.endpoint()?;
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.polling.timeout_ms))
            .connect_timeout(Duration::from_millis(config.polling.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Some(Self { http, endpoint })
    }
}

#[async_trait]
impl TimeSource for WorldTimeClient {
    async fn fetch_now(&self) -> Result<DateTime<FixedOffset>, TimeSyncError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| TimeSyncError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TimeSyncError::Unreachable(format!("HTTP {status}")));
        }

        let body: TimeResponse = response
            .json()
            .await
            .map_err(|err| TimeSyncError::Malformed(err.to_string()))?;

        let now = DateTime::parse_from_rfc3339(&body.datetime)
            .map_err(|err| TimeSyncError::Malformed(format!("{}: {err}", body.datetime)))?;

        debug!(now = %now, "Time synchronized");
        Ok(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_response_parses_worldtime_payload() {
        let body: TimeResponse = serde_json::from_str(
            r#"{"datetime":"2026-08-07T14:23:11.123456+02:00","unixtime":1786451000,"utc_offset":"+02:00"}"#,
        )
        .unwrap();

        let parsed = DateTime::parse_from_rfc3339(&body.datetime).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn garbage_datetime_is_malformed() {
        let result = DateTime::parse_from_rfc3339("yesterday, around lunch");
        assert!(result.is_err());
    }
}
