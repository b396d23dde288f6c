//! Recording activation handler for testing.

use crate::dwell::ActivationEvent;
use crate::error::HandlerError;
use crate::keypad::Key;
use crate::traits::ActivationHandler;

/// Records every activation it receives.
///
/// A failing recorder counts attempts but rejects every event, for testing
/// that handler errors do not disturb the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    events: Vec<ActivationEvent>,
    attempts: usize,
    fail: bool,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that rejects every activation.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Accepted events, in order.
    pub fn events(&self) -> &[ActivationEvent] {
        &self.events
    }

    /// Keys of accepted events, in order.
    pub fn keys(&self) -> Vec<Key> {
        self.events.iter().map(|e| e.key).collect()
    }

    /// Number of `on_activate` calls, accepted or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }
}

impl ActivationHandler for RecordingHandler {
    fn on_activate(&mut self, event: &ActivationEvent) -> Result<(), HandlerError> {
        self.attempts += 1;
        if self.fail {
            return Err(HandlerError::Failed("mock failure".to_string()));
        }
        self.events.push(*event);
        Ok(())
    }
}
