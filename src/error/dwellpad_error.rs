//! Unified error type.

use thiserror::Error;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::engine::EngineError;
use super::handler::HandlerError;
use super::sample::SampleError;
use super::source::SourceError;

/// Unified error type for dwellpad.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DwellpadError {
    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl DwellpadError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DwellpadError::Sample(_) => ErrorCategory::Input,
            DwellpadError::Source(_) => ErrorCategory::Network,
            DwellpadError::Handler(_) => ErrorCategory::Handler,
            DwellpadError::Config(_) => ErrorCategory::Configuration,
            DwellpadError::Engine(_) => ErrorCategory::Runtime,
        }
    }

    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DwellpadError::Sample(err) => err.error_code(),
            DwellpadError::Source(err) => err.error_code(),
            DwellpadError::Handler(err) => err.error_code(),
            DwellpadError::Config(err) => err.error_code(),
            DwellpadError::Engine(err) => err.error_code(),
        }
    }

    /// Get a message suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            DwellpadError::Sample(_) => "Ignored an unreadable gaze sample".to_string(),
            DwellpadError::Source(SourceError::ConnectionFailed(msg)) => {
                format!("Could not reach the gaze estimator: {}", msg)
            }
            DwellpadError::Source(err) => format!("Gaze estimator problem: {}", err),
            DwellpadError::Handler(err) => format!("Key could not be applied: {}", err),
            DwellpadError::Config(err) => format!("Configuration error: {}", err),
            DwellpadError::Engine(_) => "The keypad engine has stopped".to_string(),
        }
    }
}
