//! Position source (estimator connection) errors.

use thiserror::Error;

/// Errors raised by a position source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The initial connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The source is no longer connected.
    #[error("disconnected from position source")]
    Disconnected,

    /// The source did not reach the expected state in time.
    #[error("timed out after {0} ms waiting for position source")]
    Timeout(u64),

    /// The estimator URL is not a websocket URL.
    #[error("invalid estimator url: {0}")]
    InvalidUrl(String),
}

impl SourceError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::ConnectionFailed(_) => "SOURCE_CONNECTION_FAILED",
            SourceError::Disconnected => "SOURCE_DISCONNECTED",
            SourceError::Timeout(_) => "SOURCE_TIMEOUT",
            SourceError::InvalidUrl(_) => "SOURCE_INVALID_URL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        assert_eq!(
            SourceError::ConnectionFailed("refused".to_string()).to_string(),
            "connection failed: refused"
        );
        assert_eq!(
            SourceError::Timeout(500).to_string(),
            "timed out after 500 ms waiting for position source"
        );
        assert_eq!(
            SourceError::InvalidUrl("http://x".to_string()).error_code(),
            "SOURCE_INVALID_URL"
        );
    }
}
