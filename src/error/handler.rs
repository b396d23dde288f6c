//! Activation handler errors.

use thiserror::Error;

use crate::keypad::Key;

/// Errors an activation handler may report back to the engine.
///
/// The engine logs these and moves on; they never change dwell state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The handler refused this key.
    #[error("handler rejected {key}: {reason}")]
    Rejected { key: Key, reason: String },

    /// The downstream channel has no receiver.
    #[error("activation channel closed")]
    ChannelClosed,

    /// Any other failure.
    #[error("handler failed: {0}")]
    Failed(String),
}

impl HandlerError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            HandlerError::Rejected { .. } => "HANDLER_REJECTED",
            HandlerError::ChannelClosed => "HANDLER_CHANNEL_CLOSED",
            HandlerError::Failed(_) => "HANDLER_FAILED",
        }
    }
}
