//! Runtime configuration.
//!
//! Use the builder methods to customize behavior, or [`DwellConfig::from_env`]
//! to pick up overrides from the environment.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dwellpad::config::DwellConfig;
//!
//! let config = DwellConfig::default()
//!     .with_dwell_threshold(Duration::from_millis(1500))
//!     .with_tick_interval(Duration::from_millis(50));
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::dwell::DEFAULT_DWELL_THRESHOLD;
use crate::error::ConfigError;
use crate::keypad::{Key, LayoutMetrics, KEYPAD_ORDER};
use crate::sample::{CalibrationOffset, CoordinateMapper, SampleSpace};

/// Environment variable overriding the dwell threshold in milliseconds.
pub const ENV_DWELL_MS: &str = "DWELLPAD_DWELL_MS";
/// Environment variable overriding the progress tick in milliseconds.
pub const ENV_TICK_MS: &str = "DWELLPAD_TICK_MS";
/// Environment variable overriding the horizontal calibration offset.
pub const ENV_OFFSET_X: &str = "DWELLPAD_OFFSET_X";
/// Environment variable overriding the vertical calibration offset.
pub const ENV_OFFSET_Y: &str = "DWELLPAD_OFFSET_Y";
/// Environment variable overriding the estimator websocket URL.
pub const ENV_ESTIMATOR_URL: &str = "DWELLPAD_ESTIMATOR_URL";

/// Default cadence of progress updates.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Connection settings for the gaze estimator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Websocket URL (`ws://` or `wss://`).
    pub url: String,
    /// Reconnection attempts before giving up.
    pub max_retries: u8,
    /// Upper bound for the exponential backoff between attempts.
    pub max_backoff_secs: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:5000/ws".to_string(),
            max_retries: 5,
            max_backoff_secs: 30,
        }
    }
}

impl EstimatorConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_max_backoff_secs(mut self, secs: u64) -> Self {
        self.max_backoff_secs = secs;
        self
    }

    /// Backoff before reconnection `attempt` (1-based): 1s, 2s, 4s, ...
    /// capped at `max_backoff_secs`.
    pub fn backoff(&self, attempt: u8) -> Duration {
        let exp = u32::from(attempt.saturating_sub(1)).min(16);
        Duration::from_secs((1u64 << exp).min(self.max_backoff_secs))
    }
}

/// Configuration for the dwell engine and its runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellConfig {
    /// Continuous dwell time needed to activate a key (default: 2s).
    pub dwell_threshold: Duration,
    /// Interval between progress snapshots (default: 100ms).
    pub tick_interval: Duration,
    /// Coordinate space of incoming samples.
    pub sample_space: SampleSpace,
    /// Offset added to every mapped sample.
    pub calibration: CalibrationOffset,
    /// Keypad geometry.
    pub metrics: LayoutMetrics,
    /// Keys in layout order.
    pub keys: Vec<Key>,
    /// Estimator connection settings.
    pub estimator: EstimatorConfig,
}

impl Default for DwellConfig {
    /// Reference behavior: normalized samples on a pixel display.
    fn default() -> Self {
        Self {
            dwell_threshold: DEFAULT_DWELL_THRESHOLD,
            tick_interval: DEFAULT_TICK_INTERVAL,
            sample_space: SampleSpace::Normalized,
            calibration: CalibrationOffset::default(),
            metrics: LayoutMetrics::default(),
            keys: KEYPAD_ORDER.to_vec(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl DwellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for a terminal keypad: cell metrics and no calibration offset.
    pub fn terminal() -> Self {
        Self::default()
            .with_metrics(LayoutMetrics::terminal())
            .with_calibration(CalibrationOffset::ZERO)
    }

    pub fn with_dwell_threshold(mut self, threshold: Duration) -> Self {
        self.dwell_threshold = threshold;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_sample_space(mut self, space: SampleSpace) -> Self {
        self.sample_space = space;
        self
    }

    pub fn with_calibration(mut self, offset: CalibrationOffset) -> Self {
        self.calibration = offset;
        self
    }

    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_keys(mut self, keys: impl Into<Vec<Key>>) -> Self {
        self.keys = keys.into();
        self
    }

    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    /// The mapper implied by `sample_space` and `calibration`.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.sample_space, self.calibration)
    }

    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `DWELLPAD_*` environment variables on top of this config.
    ///
    /// Unset variables leave the current value alone.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(ms) = env_parse::<u64>(ENV_DWELL_MS)? {
            self.dwell_threshold = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>(ENV_TICK_MS)? {
            self.tick_interval = Duration::from_millis(ms);
        }
        if let Some(x) = env_parse::<f64>(ENV_OFFSET_X)? {
            self.calibration.x = x;
        }
        if let Some(y) = env_parse::<f64>(ENV_OFFSET_Y)? {
            self.calibration.y = y;
        }
        if let Ok(url) = std::env::var(ENV_ESTIMATOR_URL) {
            self.estimator.url = url;
        }
        Ok(self)
    }

    /// Check that the configuration can drive the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dwell_threshold.is_zero() {
            return Err(ConfigError::invalid(
                "dwell_threshold",
                "0ms",
                "must be greater than zero",
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::invalid(
                "tick_interval",
                "0ms",
                "must be greater than zero",
            ));
        }
        if !self.calibration.x.is_finite() || !self.calibration.y.is_finite() {
            return Err(ConfigError::invalid(
                "calibration",
                format!("({}, {})", self.calibration.x, self.calibration.y),
                "offsets must be finite",
            ));
        }
        self.metrics.validate()?;
        if !(self.estimator.url.starts_with("ws://") || self.estimator.url.starts_with("wss://")) {
            return Err(ConfigError::invalid(
                "estimator.url",
                &self.estimator.url,
                "must start with ws:// or wss://",
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::invalid(name, raw, "could not be parsed")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            ENV_DWELL_MS,
            ENV_TICK_MS,
            ENV_OFFSET_X,
            ENV_OFFSET_Y,
            ENV_ESTIMATOR_URL,
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = DwellConfig::default();
        assert_eq!(config.dwell_threshold, Duration::from_secs(2));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.calibration, CalibrationOffset::new(-25.0, 25.0));
        assert_eq!(config.sample_space, SampleSpace::Normalized);
        assert_eq!(config.keys.len(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_terminal_preset() {
        let config = DwellConfig::terminal();
        assert_eq!(config.metrics, LayoutMetrics::terminal());
        assert_eq!(config.calibration, CalibrationOffset::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let config = DwellConfig::default().with_dwell_threshold(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = DwellConfig::default().with_tick_interval(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url_and_offsets() {
        let config = DwellConfig::default()
            .with_estimator(EstimatorConfig::default().with_url("http://localhost:5000"));
        assert!(config.validate().is_err());

        let config =
            DwellConfig::default().with_calibration(CalibrationOffset::new(f64::NAN, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let estimator = EstimatorConfig::default().with_max_backoff_secs(5);
        assert_eq!(estimator.backoff(1), Duration::from_secs(1));
        assert_eq!(estimator.backoff(2), Duration::from_secs(2));
        assert_eq!(estimator.backoff(3), Duration::from_secs(4));
        assert_eq!(estimator.backoff(4), Duration::from_secs(5));
        assert_eq!(estimator.backoff(200), Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var(ENV_DWELL_MS, "1500");
        std::env::set_var(ENV_OFFSET_X, "-10.5");
        std::env::set_var(ENV_ESTIMATOR_URL, "ws://10.0.0.2:5000/ws");

        let config = DwellConfig::from_env().unwrap();
        assert_eq!(config.dwell_threshold, Duration::from_millis(1500));
        assert_eq!(config.calibration, CalibrationOffset::new(-10.5, 25.0));
        assert_eq!(config.estimator.url, "ws://10.0.0.2:5000/ws");
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_override_parse_error() {
        clear_env();
        std::env::set_var(ENV_TICK_MS, "fast");

        let err = DwellConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == ENV_TICK_MS));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_overrides_keep_preset() {
        clear_env();
        std::env::set_var(ENV_OFFSET_Y, "2");

        let config = DwellConfig::terminal().with_env_overrides().unwrap();
        assert_eq!(config.metrics, LayoutMetrics::terminal());
        assert_eq!(config.calibration, CalibrationOffset::new(0.0, 2.0));

        clear_env();
    }
}
