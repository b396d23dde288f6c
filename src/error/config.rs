//! Configuration and argument errors.

use thiserror::Error;

/// Invalid configuration value or command-line argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting has a value that cannot be used.
    #[error("invalid value for {name}: `{value}` ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// An unknown command-line argument.
    #[error("unrecognized argument: {0}")]
    InvalidArgument(String),

    /// A flag that takes a value was given none.
    #[error("missing value for {0}")]
    MissingValue(String),
}

impl ConfigError {
    /// Convenience constructor for [`ConfigError::InvalidValue`].
    pub fn invalid(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::InvalidArgument(_) => "CONFIG_INVALID_ARGUMENT",
            ConfigError::MissingValue(_) => "CONFIG_MISSING_VALUE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_constructor() {
        let err = ConfigError::invalid("gutter", 0.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid value for gutter: `0` (must be positive)"
        );
    }

    #[test]
    fn test_missing_value_display() {
        assert_eq!(
            ConfigError::MissingValue("--dwell-ms".to_string()).to_string(),
            "missing value for --dwell-ms"
        );
    }
}
