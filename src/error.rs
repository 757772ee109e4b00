use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// These are fatal: the daemon renders a clear message and halts rather
/// than retrying, since recovery requires the operator to fix the config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Balance-poll errors, produced at the backend adapter boundary.
///
/// Transport-level failures are converted into these variants before they
/// reach the display state machine; all of them are recoverable and move
/// the engine into its retrying state.
#[derive(Error, Debug)]
pub enum PollError {
    #[error("backend unreachable: {0}")]
    BackendUnreachable(String),

    #[error("backend rejected invoice key: {0}")]
    BackendAuth(String),

    #[error("malformed backend response: {0}")]
    BackendMalformed(String),
}

/// Time synchronization errors.
///
/// Recoverable: on failure the device clock degrades to the local system
/// clock instead of blocking startup.
#[derive(Error, Debug)]
pub enum TimeSyncError {
    #[error("time server unreachable: {0}")]
    Unreachable(String),

    #[error("unparsable time response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error(transparent)]
    TimeSync(#[from] TimeSyncError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl PollError {
    /// Classify a transport error from the HTTP layer.
    ///
    /// Status codes are handled before a body is read; what reaches this
    /// point is either a connection/timeout problem or a body that failed
    /// to decode.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::BackendMalformed(err.to_string());
        }
        Self::BackendUnreachable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_name_the_field() {
        let err = ConfigError::MissingField { field: "invoice_key" };
        assert_eq!(err.to_string(), "missing required field: invoice_key");

        let err = ConfigError::InvalidValue {
            field: "backend.port",
            reason: "must be non-zero".into(),
        };
        assert!(err.to_string().contains("backend.port"));
        assert!(err.to_string().contains("non-zero"));
    }

    #[test]
    fn poll_errors_are_distinguishable() {
        let unreachable = PollError::BackendUnreachable("connect refused".into());
        let auth = PollError::BackendAuth("HTTP 401".into());
        let malformed = PollError::BackendMalformed("missing balance".into());

        assert!(unreachable.to_string().starts_with("backend unreachable"));
        assert!(auth.to_string().contains("invoice key"));
        assert!(malformed.to_string().starts_with("malformed"));
    }

    #[test]
    fn errors_aggregate_transparently() {
        let err: Error = PollError::BackendUnreachable("down".into()).into();
        assert_eq!(err.to_string(), "backend unreachable: down");

        let err: Error = TimeSyncError::Malformed("bad json".into()).into();
        assert_eq!(err.to_string(), "unparsable time response: bad json");
    }
}
