//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use dwellpad::config::DwellConfig;
use dwellpad::dwell::DwellEngine;
use dwellpad::keypad::{compute_layout, Key, LayoutMetrics, Point, Viewport};
use dwellpad::sample::{CalibrationOffset, RawSample, SampleSpace, TimedSample};
use dwellpad::traits::ActivationHandler;

/// Reference viewport of the scenarios.
pub const VIEWPORT: Viewport = Viewport::new(300.0, 600.0);

/// Metrics placing key "5" at `{110, 430, 90, 60}` on [`VIEWPORT`].
pub fn scenario_metrics() -> LayoutMetrics {
    LayoutMetrics::default()
        .with_margin_left(10.0)
        .with_bottom_offset(30.0)
}

/// Pixel-space samples, no calibration offset, scenario metrics.
pub fn scenario_config() -> DwellConfig {
    DwellConfig::default()
        .with_sample_space(SampleSpace::Pixels)
        .with_calibration(CalibrationOffset::ZERO)
        .with_metrics(scenario_metrics())
}

pub fn scenario_engine<H: ActivationHandler>(handler: H) -> DwellEngine<H> {
    DwellEngine::new(&scenario_config(), VIEWPORT, handler)
}

/// Center of `key` in the scenario layout.
pub fn center_of(key: Key) -> Point {
    compute_layout(VIEWPORT, &scenario_config().keys, &scenario_metrics())
        .rect_of(key)
        .map(|r| r.center())
        .expect("key is on the keypad")
}

pub fn sample_at(point: Point, at: Instant) -> TimedSample {
    TimedSample::new(RawSample::new(point.x, point.y), at)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Feed `count` samples on `key`, `step` apart, starting at `start`.
///
/// Returns the keys activated along the way.
pub fn dwell_on<H: ActivationHandler>(
    engine: &mut DwellEngine<H>,
    key: Key,
    start: Instant,
    step: Duration,
    count: u32,
) -> Vec<Key> {
    let point = center_of(key);
    (0..count)
        .filter_map(|i| engine.on_sample(&sample_at(point, start + step * i)))
        .map(|event| event.key)
        .collect()
}
