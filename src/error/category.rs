//! High-level error classification.

use std::fmt;

/// High-level categorization of errors for logging and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input data (malformed position samples).
    /// Dropped on the floor, never retried.
    Input,

    /// Connection problems with the position source.
    /// Generally transient and retryable.
    Network,

    /// An activation handler failed to apply an event.
    Handler,

    /// Invalid settings or command-line arguments.
    /// Not retryable until the configuration is corrected.
    Configuration,

    /// The engine runtime is no longer available.
    Runtime,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Short label suitable for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Handler => "handler",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Runtime => "runtime",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
