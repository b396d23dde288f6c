//! Errors for position samples that cannot be used.

use thiserror::Error;

/// Why a position sample was dropped.
///
/// A dropped sample is never fatal: the engine treats it as "no hit" for
/// that sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// The payload was not valid JSON or had the wrong shape.
    #[error("unparseable sample: {message}")]
    Unparseable { message: String },

    /// A coordinate field was absent.
    #[error("sample is missing field `{field}`")]
    MissingField { field: &'static str },

    /// A coordinate field was present but not a number.
    #[error("sample field `{field}` is not numeric")]
    NonNumeric { field: &'static str },

    /// A coordinate was NaN or infinite.
    #[error("sample field `{field}` is not finite")]
    NonFinite { field: &'static str },

    /// A coordinate fell outside the accepted range.
    #[error("sample field `{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl SampleError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SampleError::Unparseable { .. } => "SAMPLE_UNPARSEABLE",
            SampleError::MissingField { .. } => "SAMPLE_MISSING_FIELD",
            SampleError::NonNumeric { .. } => "SAMPLE_NON_NUMERIC",
            SampleError::NonFinite { .. } => "SAMPLE_NON_FINITE",
            SampleError::OutOfRange { .. } => "SAMPLE_OUT_OF_RANGE",
        }
    }
}
