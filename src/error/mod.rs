//! Error types for dwellpad.
//!
//! Every fallible boundary in the crate has its own error enum:
//!
//! - [`SampleError`] - a position sample that could not be used
//! - [`SourceError`] - the position source (estimator connection) failed
//! - [`HandlerError`] - an activation handler rejected an event
//! - [`ConfigError`] - invalid configuration or command-line arguments
//! - [`EngineError`] - the engine task is gone
//!
//! [`DwellpadError`] unifies them for callers that do not care which layer
//! failed, and [`ErrorCategory`] classifies them for logging and retry
//! decisions.
//!
//! None of these errors are fatal to the dwell engine itself. Sample and
//! handler errors are logged and swallowed where they occur.
//!
//! # Example
//!
//! ```
//! use dwellpad::error::{DwellpadError, ErrorCategory, SampleError};
//!
//! let err: DwellpadError = SampleError::NonFinite { field: "x" }.into();
//! assert_eq!(err.category(), ErrorCategory::Input);
//! assert_eq!(err.error_code(), "SAMPLE_NON_FINITE");
//! ```

mod category;
mod config;
mod dwellpad_error;
mod engine;
mod handler;
mod sample;
mod source;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use dwellpad_error::DwellpadError;
pub use engine::EngineError;
pub use handler::HandlerError;
pub use sample::SampleError;
pub use source::SourceError;

/// Type alias for results using [`DwellpadError`].
pub type DwellpadResult<T> = Result<T, DwellpadError>;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_every_layer_converts_into_unified_error() {
        let errors: Vec<DwellpadError> = vec![
            SampleError::MissingField { field: "y" }.into(),
            SourceError::Disconnected.into(),
            HandlerError::ChannelClosed.into(),
            ConfigError::InvalidArgument("--bogus".to_string()).into(),
            EngineError::Stopped.into(),
        ];

        for err in &errors {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }

        let categories: Vec<ErrorCategory> = errors.iter().map(|e| e.category()).collect();
        assert_eq!(
            categories,
            vec![
                ErrorCategory::Input,
                ErrorCategory::Network,
                ErrorCategory::Handler,
                ErrorCategory::Configuration,
                ErrorCategory::Runtime,
            ]
        );
    }

    #[test]
    fn test_result_alias_propagates_with_question_mark() {
        fn parse(flag: &str) -> DwellpadResult<u64> {
            let value: u64 = flag.parse().map_err(|_| ConfigError::InvalidValue {
                name: "dwell-ms".to_string(),
                value: flag.to_string(),
                reason: "expected an integer".to_string(),
            })?;
            Ok(value)
        }

        assert_eq!(parse("2000").ok(), Some(2000));
        let err = parse("soon").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
