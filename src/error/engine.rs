//! Engine runtime errors.

use thiserror::Error;

/// The engine task can no longer accept commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine has shut down.
    #[error("dwell engine has stopped")]
    Stopped,

    /// The engine task panicked or was aborted.
    #[error("dwell engine task failed: {0}")]
    TaskFailed(String),
}

impl EngineError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::Stopped => "ENGINE_STOPPED",
            EngineError::TaskFailed(_) => "ENGINE_TASK_FAILED",
        }
    }
}
