//! Poll scheduling and retry backoff configuration.

use serde::Deserialize;

/// Poll cadence and request timeout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Seconds between balance polls in steady operation.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Per-request timeout (milliseconds). A request past this deadline is
    /// treated as a failure, never left pending.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection establishment timeout (milliseconds).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Seconds an exchange rate stays fresh before it is re-fetched.
    /// Rates move slower than balances, so this is independent of
    /// `interval_secs`.
    #[serde(default = "default_rate_refresh_secs")]
    pub rate_refresh_secs: u64,
    /// Seconds the boot slogan stays on screen before steady display.
    #[serde(default = "default_slogan_secs")]
    pub slogan_secs: u64,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_rate_refresh_secs() -> u64 {
    300
}

fn default_slogan_secs() -> u64 {
    5
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            rate_refresh_secs: default_rate_refresh_secs(),
            slogan_secs: default_slogan_secs(),
        }
    }
}

/// Retry backoff configuration for failed polls.
#[derive(Debug, Clone, Deserialize)]
pub struct BackoffConfig {
    /// Initial delay before the first retry (milliseconds).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Maximum delay between retries (milliseconds).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Consecutive failures before the circuit breaker trips.
    #[serde(default = "default_max_consecutive_failures")]
    pub max_consecutive_failures: u32,
    /// Cooldown period after the circuit breaker trips (milliseconds).
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

fn default_initial_delay_ms() -> u64 {
    2_000 // 2 seconds
}

fn default_max_delay_ms() -> u64 {
    600_000 // 10 minutes
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_max_consecutive_failures() -> u32 {
    10
}

fn default_cooldown_ms() -> u64 {
    300_000 // 5 minutes
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
            max_consecutive_failures: default_max_consecutive_failures(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_defaults_are_device_appropriate() {
        let polling = PollingConfig::default();
        assert_eq!(polling.interval_secs, 60);
        assert_eq!(polling.timeout_ms, 10_000);
        assert!(polling.rate_refresh_secs >= polling.interval_secs);
    }

    #[test]
    fn backoff_defaults_cap_at_ten_minutes() {
        let backoff = BackoffConfig::default();
        assert_eq!(backoff.max_delay_ms, 600_000);
        assert!(backoff.multiplier >= 1.0);
        assert!(backoff.initial_delay_ms <= backoff.max_delay_ms);
    }
}
