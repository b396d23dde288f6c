//! Read-only views of engine state for the presentation layer.

use std::time::Duration;

use crate::keypad::{Key, Point, Viewport};

/// Dwell progress at a moment in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellProgress {
    /// Key under the cursor, if any.
    pub focused: Option<Key>,
    /// Dwell time on `focused`, capped at `threshold`.
    pub elapsed: Duration,
    pub threshold: Duration,
}

impl DwellProgress {
    pub fn idle(threshold: Duration) -> Self {
        Self {
            focused: None,
            elapsed: Duration::ZERO,
            threshold,
        }
    }

    /// Time left before activation, or `None` when idle.
    pub fn remaining(&self) -> Option<Duration> {
        self.focused
            .map(|_| self.threshold.saturating_sub(self.elapsed))
    }

    /// Completed share of the dwell in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.focused.is_none() || self.threshold.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.threshold.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Countdown text such as `"5: 1.3s"`.
    ///
    /// Remaining time is rounded up to the next tenth of a second, so the
    /// display reads `2.0s` at the start and only reaches `0.0s` once the
    /// full threshold has passed. The key fires on the next sample after
    /// that.
    pub fn countdown_label(&self) -> Option<String> {
        let key = self.focused?;
        let remaining = self.remaining()?;
        let tenths = remaining.as_millis().div_ceil(100);
        Some(format!("{}: {}.{}s", key, tenths / 10, tenths % 10))
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSnapshot {
    /// Last valid cursor position in viewport units.
    pub cursor: Option<Point>,
    pub progress: DwellProgress,
    pub viewport: Viewport,
}

impl EngineSnapshot {
    pub fn idle(threshold: Duration, viewport: Viewport) -> Self {
        Self {
            cursor: None,
            progress: DwellProgress::idle(threshold),
            viewport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(elapsed_ms: u64) -> DwellProgress {
        DwellProgress {
            focused: Some(Key::Digit(5)),
            elapsed: Duration::from_millis(elapsed_ms),
            threshold: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_idle_progress() {
        let progress = DwellProgress::idle(Duration::from_secs(2));
        assert_eq!(progress.remaining(), None);
        assert_eq!(progress.fraction(), 0.0);
        assert_eq!(progress.countdown_label(), None);
    }

    #[test]
    fn test_countdown_label_rounds_up_to_tenths() {
        assert_eq!(focused(0).countdown_label().as_deref(), Some("5: 2.0s"));
        assert_eq!(focused(100).countdown_label().as_deref(), Some("5: 1.9s"));
        assert_eq!(focused(150).countdown_label().as_deref(), Some("5: 1.9s"));
        assert_eq!(focused(1999).countdown_label().as_deref(), Some("5: 0.1s"));
        assert_eq!(focused(2000).countdown_label().as_deref(), Some("5: 0.0s"));
    }

    #[test]
    fn test_fraction() {
        assert_eq!(focused(500).fraction(), 0.25);
        assert_eq!(focused(2000).fraction(), 1.0);
    }

    #[test]
    fn test_zero_threshold_fraction_is_zero() {
        let progress = DwellProgress {
            focused: Some(Key::Clear),
            elapsed: Duration::ZERO,
            threshold: Duration::ZERO,
        };
        assert_eq!(progress.fraction(), 0.0);
    }
}
