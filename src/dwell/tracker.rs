//! The dwell state machine.
//!
//! ```text
//!  Idle ──hit k──► Dwelling(k, 0)
//!  Dwelling(k, e) ──hit k, e+Δt <  threshold──► Dwelling(k, e+Δt)
//!  Dwelling(k, e) ──hit k, e+Δt >= threshold──► Idle   (emits k)
//!  Dwelling(k, _) ──hit k' / miss──► Idle, then re-evaluated as Idle
//! ```
//!
//! `Δt` is the wall-clock gap between sample stamps. Nothing here assumes a
//! sample rate, and a sample stamped earlier than the previous one adds no
//! time.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::keypad::Key;

/// Dwell time required to activate a key.
pub const DEFAULT_DWELL_THRESHOLD: Duration = Duration::from_secs(2);

/// Current focus of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellState {
    /// No key under the cursor.
    Idle,
    /// The cursor has stayed on `key` for `elapsed`.
    Dwelling {
        key: Key,
        elapsed: Duration,
        last_sample_at: Instant,
    },
}

/// Accumulates dwell time on one key at a time.
#[derive(Debug, Clone)]
pub struct DwellTracker {
    threshold: Duration,
    state: DwellState,
}

impl DwellTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            state: DwellState::Idle,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn state(&self) -> &DwellState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DwellState::Idle
    }

    /// Key currently being dwelled on.
    pub fn focused_key(&self) -> Option<Key> {
        match self.state {
            DwellState::Idle => None,
            DwellState::Dwelling { key, .. } => Some(key),
        }
    }

    /// Dwell time accumulated up to the last sample. Zero when idle.
    pub fn elapsed(&self) -> Duration {
        match self.state {
            DwellState::Idle => Duration::ZERO,
            DwellState::Dwelling { elapsed, .. } => elapsed,
        }
    }

    /// Dwell time as of `now`, extrapolated past the last sample and capped
    /// at the threshold. Only for display; completion is decided by
    /// [`advance`](Self::advance).
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.state {
            DwellState::Idle => Duration::ZERO,
            DwellState::Dwelling {
                elapsed,
                last_sample_at,
                ..
            } => (elapsed + now.saturating_duration_since(last_sample_at)).min(self.threshold),
        }
    }

    /// Time left until activation as of `now`, or `None` when idle.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.focused_key()
            .map(|_| self.threshold.saturating_sub(self.elapsed_at(now)))
    }

    /// Feed the hit-test result of one sample stamped `at`.
    ///
    /// Returns the key whose dwell completed on this sample. The tracker is
    /// idle again afterwards, so the next activation needs a full dwell.
    pub fn advance(&mut self, hit: Option<Key>, at: Instant) -> Option<Key> {
        match (self.state, hit) {
            (
                DwellState::Dwelling {
                    key,
                    elapsed,
                    last_sample_at,
                },
                Some(hit),
            ) if hit == key => {
                let elapsed = elapsed + at.saturating_duration_since(last_sample_at);
                if elapsed >= self.threshold {
                    debug!(key = %key, elapsed_ms = elapsed.as_millis() as u64, "Dwell complete");
                    self.state = DwellState::Idle;
                    return Some(key);
                }
                self.state = DwellState::Dwelling {
                    key,
                    elapsed,
                    last_sample_at: last_sample_at.max(at),
                };
                None
            }
            (previous, Some(hit)) => {
                if let DwellState::Dwelling { key, elapsed, .. } = previous {
                    debug!(from = %key, to = %hit, abandoned_ms = elapsed.as_millis() as u64, "Focus moved");
                } else {
                    debug!(key = %hit, "Focus acquired");
                }
                self.state = DwellState::Dwelling {
                    key: hit,
                    elapsed: Duration::ZERO,
                    last_sample_at: at,
                };
                None
            }
            (previous, None) => {
                if let DwellState::Dwelling { key, .. } = previous {
                    debug!(key = %key, "Focus lost");
                }
                self.state = DwellState::Idle;
                None
            }
        }
    }

    /// Drop any focus and accumulated time.
    pub fn reset(&mut self) {
        self.state = DwellState::Idle;
    }
}

impl Default for DwellTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL_THRESHOLD)
    }
}
