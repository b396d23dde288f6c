//! The dwell selection engine.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::event::ActivationEvent;
use super::progress::{DwellProgress, EngineSnapshot};
use super::tracker::{DwellState, DwellTracker};
use crate::config::DwellConfig;
use crate::keypad::{compute_layout, hit_test, Key, Layout, LayoutMetrics, Point, Viewport};
use crate::sample::{CoordinateMapper, TimedSample};
use crate::traits::ActivationHandler;

/// Converts position samples into key activations.
///
/// The engine is synchronous and processes one input at a time. It keeps a
/// cached [`Layout`] for the current viewport, so each sample costs one
/// mapping, one hit-test and one state transition.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use dwellpad::config::DwellConfig;
/// use dwellpad::dwell::DwellEngine;
/// use dwellpad::keypad::{Key, Viewport};
/// use dwellpad::sample::{RawSample, TimedSample};
/// use dwellpad::text_buffer::TextBuffer;
///
/// let mut engine = DwellEngine::new(
///     &DwellConfig::default(),
///     Viewport::new(300.0, 600.0),
///     TextBuffer::new(),
/// );
/// let t0 = Instant::now();
/// let on_five = RawSample::new(0.625, 0.6); // (162.5, 385) after offset
///
/// assert!(engine.on_sample(&TimedSample::new(on_five, t0)).is_none());
/// let event = engine
///     .on_sample(&TimedSample::new(on_five, t0 + Duration::from_secs(2)))
///     .unwrap();
/// assert_eq!(event.key, Key::Digit(5));
/// assert_eq!(engine.handler().as_str(), "5");
/// ```
pub struct DwellEngine<H> {
    keys: Vec<Key>,
    metrics: LayoutMetrics,
    layout: Layout,
    mapper: CoordinateMapper,
    tracker: DwellTracker,
    handler: H,
    cursor: Option<Point>,
}

impl<H: ActivationHandler> DwellEngine<H> {
    /// Build an engine for `viewport`, delivering activations to `handler`.
    pub fn new(config: &DwellConfig, viewport: Viewport, handler: H) -> Self {
        let layout = compute_layout(viewport, &config.keys, &config.metrics);
        Self {
            keys: config.keys.clone(),
            metrics: config.metrics,
            layout,
            mapper: config.mapper(),
            tracker: DwellTracker::new(config.dwell_threshold),
            handler,
            cursor: None,
        }
    }

    /// Process one position sample.
    ///
    /// Malformed samples are logged and count as a miss. Returns the
    /// activation completed by this sample, if any; the handler has already
    /// seen it.
    pub fn on_sample(&mut self, sample: &TimedSample) -> Option<ActivationEvent> {
        let point = match &sample.payload {
            Ok(raw) => match self.mapper.map(raw, self.layout.viewport()) {
                Ok(point) => Some(point),
                Err(err) => {
                    warn!(code = err.error_code(), "Dropping sample: {}", err);
                    None
                }
            },
            Err(err) => {
                warn!(code = err.error_code(), "Dropping sample: {}", err);
                None
            }
        };
        self.on_point(point, sample.received_at)
    }

    /// Process a point already in viewport units. `None` is a miss.
    pub fn on_point(&mut self, point: Option<Point>, at: Instant) -> Option<ActivationEvent> {
        if point.is_some() {
            self.cursor = point;
        }
        let hit = point.and_then(|p| hit_test(p, &self.layout));
        let key = self.tracker.advance(hit, at)?;

        let event = ActivationEvent::dwell(key, at);
        self.dispatch(&event);
        Some(event)
    }

    /// Activate `key` immediately, bypassing dwell.
    ///
    /// Dwell progress on any other key is left untouched. If `key` itself is
    /// being dwelled on, that dwell is dropped so it cannot fire a second
    /// time right after.
    pub fn activate_now(&mut self, key: Key, at: Instant) -> ActivationEvent {
        if self.tracker.focused_key() == Some(key) {
            self.tracker.reset();
        }
        let event = ActivationEvent::manual(key, at);
        self.dispatch(&event);
        event
    }

    /// Recompute the layout for a new viewport size.
    ///
    /// Dwell state is kept; the next sample is hit-tested against the new
    /// rectangles.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.layout.viewport() {
            return;
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "Recomputing keypad layout"
        );
        self.layout = compute_layout(viewport, &self.keys, &self.metrics);
    }

    /// Clear dwell state and the cursor.
    pub fn shutdown(&mut self) {
        self.tracker.reset();
        self.cursor = None;
    }

    /// Dwell progress as of `now`.
    pub fn progress(&self, now: Instant) -> DwellProgress {
        DwellProgress {
            focused: self.tracker.focused_key(),
            elapsed: self.tracker.elapsed_at(now),
            threshold: self.tracker.threshold(),
        }
    }

    /// Snapshot for the presentation layer as of `now`.
    pub fn snapshot(&self, now: Instant) -> EngineSnapshot {
        EngineSnapshot {
            cursor: self.cursor,
            progress: self.progress(now),
            viewport: self.layout.viewport(),
        }
    }

    pub fn state(&self) -> &DwellState {
        self.tracker.state()
    }

    pub fn focused_key(&self) -> Option<Key> {
        self.tracker.focused_key()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consume the engine and return its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn dispatch(&mut self, event: &ActivationEvent) {
        info!(key = %event.key, source = ?event.source, "Key activated");
        if let Err(err) = self.handler.on_activate(event) {
            warn!(key = %event.key, code = err.error_code(), "Activation handler failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::RecordingHandler;
    use crate::dwell::ActivationSource;
    use crate::error::SampleError;
    use crate::keypad::Rect;
    use crate::sample::{CalibrationOffset, RawSample, SampleSpace};
    use std::time::Duration;

    fn pixel_engine() -> DwellEngine<RecordingHandler> {
        let config = DwellConfig::default()
            .with_sample_space(SampleSpace::Pixels)
            .with_calibration(CalibrationOffset::ZERO);
        DwellEngine::new(&config, Viewport::new(300.0, 600.0), RecordingHandler::new())
    }

    fn center_of(engine: &DwellEngine<RecordingHandler>, key: Key) -> RawSample {
        let c = engine.layout().rect_of(key).unwrap().center();
        RawSample::new(c.x, c.y)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_dwell_delivers_to_handler() {
        let mut engine = pixel_engine();
        let t0 = Instant::now();
        let five = center_of(&engine, Key::Digit(5));

        engine.on_sample(&TimedSample::new(five, t0));
        let event = engine.on_sample(&TimedSample::new(five, t0 + ms(2000))).unwrap();

        assert_eq!(event.key, Key::Digit(5));
        assert_eq!(event.source, ActivationSource::Dwell);
        assert_eq!(engine.handler().keys(), vec![Key::Digit(5)]);
        assert!(engine.focused_key().is_none());
    }

    #[test]
    fn test_malformed_sample_counts_as_miss() {
        let mut engine = pixel_engine();
        let t0 = Instant::now();
        let five = center_of(&engine, Key::Digit(5));

        engine.on_sample(&TimedSample::new(five, t0));
        engine.on_sample(&TimedSample::malformed(
            SampleError::NonNumeric { field: "x" },
            t0 + ms(1000),
        ));
        assert!(engine.focused_key().is_none());

        // Out-of-range pixel sample also misses
        engine.on_sample(&TimedSample::new(five, t0 + ms(1100)));
        engine.on_sample(&TimedSample::new(RawSample::new(5000.0, 1.0), t0 + ms(1200)));
        assert!(engine.focused_key().is_none());
        assert!(engine.handler().events().is_empty());
    }

    #[test]
    fn test_cursor_keeps_last_valid_point() {
        let mut engine = pixel_engine();
        let t0 = Instant::now();

        engine.on_sample(&TimedSample::new(RawSample::new(10.0, 20.0), t0));
        engine.on_sample(&TimedSample::malformed(
            SampleError::MissingField { field: "y" },
            t0 + ms(100),
        ));
        assert_eq!(engine.cursor(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_manual_activation_bypasses_dwell_and_keeps_other_focus() {
        let mut engine = pixel_engine();
        let t0 = Instant::now();
        let five = center_of(&engine, Key::Digit(5));

        engine.on_sample(&TimedSample::new(five, t0));
        engine.on_sample(&TimedSample::new(five, t0 + ms(1000)));

        let event = engine.activate_now(Key::Clear, t0 + ms(1050));
        assert!(event.is_manual());
        assert_eq!(engine.handler().keys(), vec![Key::Clear]);

        // Dwell on "5" continues where it was
        assert_eq!(engine.focused_key(), Some(Key::Digit(5)));
        let event = engine.on_sample(&TimedSample::new(five, t0 + ms(2000)));
        assert_eq!(event.map(|e| e.key), Some(Key::Digit(5)));
    }

    #[test]
    fn test_manual_activation_of_focused_key_rearms() {
        let mut engine = pixel_engine();
        let t0 = Instant::now();
        let five = center_of(&engine, Key::Digit(5));

        engine.on_sample(&TimedSample::new(five, t0));
        engine.on_sample(&TimedSample::new(five, t0 + ms(1900)));
        engine.activate_now(Key::Digit(5), t0 + ms(1950));

        assert!(engine.on_sample(&TimedSample::new(five, t0 + ms(2000))).is_none());
        assert_eq!(engine.handler().keys(), vec![Key::Digit(5)]);
    }

    #[test]
    fn test_failing_handler_does_not_disturb_engine() {
        let config = DwellConfig::default()
            .with_sample_space(SampleSpace::Pixels)
            .with_calibration(CalibrationOffset::ZERO);
        let mut engine = DwellEngine::new(
            &config,
            Viewport::new(300.0, 600.0),
            RecordingHandler::failing(),
        );
        let t0 = Instant::now();
        let five = center_of(&engine, Key::Digit(5));

        engine.on_sample(&TimedSample::new(five, t0));
        let event = engine.on_sample(&TimedSample::new(five, t0 + ms(2000)));
        assert!(event.is_some());
        assert!(engine.focused_key().is_none());

        // Still works afterwards
        engine.on_sample(&TimedSample::new(five, t0 + ms(2100)));
        assert!(engine.on_sample(&TimedSample::new(five, t0 + ms(4100))).is_some());
        assert_eq!(engine.handler().attempts(), 2);
    }

    #[test]
    fn test_resize_recomputes_layout() {
        let mut engine = pixel_engine();
        let before = engine.layout().rect_of(Key::Digit(1)).unwrap();

        engine.resize(Viewport::new(600.0, 300.0));
        let after = engine.layout().rect_of(Key::Digit(1)).unwrap();

        assert_eq!(before, Rect::new(20.0, 290.0, 90.0, 60.0));
        assert_eq!(after, Rect::new(20.0, -10.0, 180.0, 60.0));
        assert_eq!(engine.layout().viewport(), Viewport::new(600.0, 300.0));
    }

    #[test]
    fn test_empty_key_set_idles_forever() {
        let config = DwellConfig::default()
            .with_sample_space(SampleSpace::Pixels)
            .with_keys(Vec::new());
        let mut engine =
            DwellEngine::new(&config, Viewport::new(300.0, 600.0), RecordingHandler::new());
        let t0 = Instant::now();

        for i in 0..50 {
            let sample = TimedSample::new(RawSample::new(150.0, 400.0), t0 + ms(i * 100));
            assert!(engine.on_sample(&sample).is_none());
            assert!(engine.focused_key().is_none());
        }
    }

    #[test]
    fn test_snapshot_reports_progress_and_shutdown_clears() {
        let mut engine = pixel_engine();
        let t0 = Instant::now();
        let five = center_of(&engine, Key::Digit(5));

        engine.on_sample(&TimedSample::new(five, t0));
        let snapshot = engine.snapshot(t0 + ms(500));
        assert_eq!(snapshot.progress.focused, Some(Key::Digit(5)));
        assert_eq!(snapshot.progress.remaining(), Some(ms(1500)));
        assert!(snapshot.cursor.is_some());

        engine.shutdown();
        let snapshot = engine.snapshot(t0 + ms(600));
        assert_eq!(snapshot.progress.focused, None);
        assert_eq!(snapshot.cursor, None);
    }
}
