//! Activation events.

use std::time::Instant;

use crate::keypad::Key;

/// How an activation came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationSource {
    /// The cursor dwelled on the key for the full threshold.
    Dwell,
    /// The presentation layer activated the key directly (tap/click).
    Manual,
}

/// A key press produced by the engine.
///
/// Emitted exactly once per completed dwell or manual activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEvent {
    pub key: Key,
    pub at: Instant,
    pub source: ActivationSource,
}

impl ActivationEvent {
    pub fn dwell(key: Key, at: Instant) -> Self {
        Self {
            key,
            at,
            source: ActivationSource::Dwell,
        }
    }

    pub fn manual(key: Key, at: Instant) -> Self {
        Self {
            key,
            at,
            source: ActivationSource::Manual,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.source == ActivationSource::Manual
    }
}
