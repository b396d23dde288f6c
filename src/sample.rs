//! Position samples and the mapping from estimator space to the viewport.
//!
//! The estimator reports gaze as `{x, y}`. Depending on the source these are
//! normalized `[0, 1]` coordinates or already in viewport units. A
//! [`CoordinateMapper`] validates each sample, scales normalized input by the
//! viewport size and then adds a calibration offset. The reference estimator
//! needs `(-25, +25)` px; it is a setting, not a constant, because it
//! depends on the estimator and camera placement.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SampleError;
use crate::keypad::{Point, Viewport};

/// A position as reported by the source, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
}

impl RawSample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Extract a sample from a JSON object with numeric `x` and `y` fields.
    ///
    /// Numbers encoded as strings are rejected, matching what the estimator
    /// actually sends.
    pub fn from_json(value: &Value) -> Result<Self, SampleError> {
        let object = value.as_object().ok_or_else(|| SampleError::Unparseable {
            message: format!("expected an object, got {}", json_kind(value)),
        })?;
        let field = |name: &'static str| -> Result<f64, SampleError> {
            let v = object
                .get(name)
                .ok_or(SampleError::MissingField { field: name })?;
            v.as_f64().ok_or(SampleError::NonNumeric { field: name })
        };
        Ok(Self::new(field("x")?, field("y")?))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A sample (or the reason it was unusable) stamped with its arrival time.
///
/// Malformed samples still flow to the engine: they count as "no hit".
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSample {
    pub payload: Result<RawSample, SampleError>,
    pub received_at: Instant,
}

impl TimedSample {
    pub fn new(sample: RawSample, received_at: Instant) -> Self {
        Self {
            payload: Ok(sample),
            received_at,
        }
    }

    pub fn malformed(error: SampleError, received_at: Instant) -> Self {
        Self {
            payload: Err(error),
            received_at,
        }
    }

    /// Stamp a payload with the current time.
    ///
    /// Uses tokio's clock so paused-time tests see consistent stamps.
    pub fn now(payload: Result<RawSample, SampleError>) -> Self {
        Self {
            payload,
            received_at: tokio::time::Instant::now().into_std(),
        }
    }
}

/// Coordinate space of incoming samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSpace {
    /// `[0, 1]` on both axes; scaled by the viewport size.
    #[default]
    Normalized,
    /// Already in viewport units; must lie within the viewport.
    Pixels,
}

/// Offset added after scaling, in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOffset {
    pub x: f64,
    pub y: f64,
}

impl CalibrationOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for CalibrationOffset {
    /// The reference estimator's cursor correction.
    fn default() -> Self {
        Self::new(-25.0, 25.0)
    }
}

/// Validates samples and converts them to viewport points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    space: SampleSpace,
    offset: CalibrationOffset,
}

impl CoordinateMapper {
    pub fn new(space: SampleSpace, offset: CalibrationOffset) -> Self {
        Self { space, offset }
    }

    pub fn space(&self) -> SampleSpace {
        self.space
    }

    pub fn offset(&self) -> CalibrationOffset {
        self.offset
    }

    /// Map a raw sample into the viewport.
    ///
    /// Rejects non-finite coordinates and coordinates outside the accepted
    /// range of the sample space. The offset may move a valid sample off the
    /// viewport; that is a miss, not an error.
    pub fn map(&self, sample: &RawSample, viewport: Viewport) -> Result<Point, SampleError> {
        let (max_x, max_y) = match self.space {
            SampleSpace::Normalized => (1.0, 1.0),
            SampleSpace::Pixels => (viewport.width, viewport.height),
        };
        let x = check_axis("x", sample.x, max_x)?;
        let y = check_axis("y", sample.y, max_y)?;

        let (x, y) = match self.space {
            SampleSpace::Normalized => (x * viewport.width, y * viewport.height),
            SampleSpace::Pixels => (x, y),
        };
        Ok(Point::new(x + self.offset.x, y + self.offset.y))
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(SampleSpace::default(), CalibrationOffset::default())
    }
}

fn check_axis(field: &'static str, value: f64, max: f64) -> Result<f64, SampleError> {
    if !value.is_finite() {
        return Err(SampleError::NonFinite { field });
    }
    if !(0.0..=max).contains(&value) {
        return Err(SampleError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_accepts_numbers() {
        let sample = RawSample::from_json(&json!({"x": 0.25, "y": 1})).unwrap();
        assert_eq!(sample, RawSample::new(0.25, 1.0));
    }

    #[test]
    fn test_from_json_ignores_extra_fields() {
        let sample = RawSample::from_json(&json!({"x": 0.5, "y": 0.5, "conf": 0.9})).unwrap();
        assert_eq!(sample, RawSample::new(0.5, 0.5));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert_eq!(
            RawSample::from_json(&json!({"x": "0.5", "y": 0.5})),
            Err(SampleError::NonNumeric { field: "x" })
        );
        assert_eq!(
            RawSample::from_json(&json!({"x": 0.5})),
            Err(SampleError::MissingField { field: "y" })
        );
        assert!(matches!(
            RawSample::from_json(&json!([0.5, 0.5])),
            Err(SampleError::Unparseable { .. })
        ));
        assert!(matches!(
            RawSample::from_json(&json!({"x": null, "y": 0.1})),
            Err(SampleError::NonNumeric { field: "x" })
        ));
    }

    #[test]
    fn test_normalized_mapping_applies_reference_offset() {
        let mapper = CoordinateMapper::default();
        let point = mapper
            .map(&RawSample::new(0.5, 0.5), Viewport::new(300.0, 600.0))
            .unwrap();
        assert_eq!(point, Point::new(125.0, 325.0));
    }

    #[test]
    fn test_normalized_bounds_are_inclusive() {
        let mapper = CoordinateMapper::new(SampleSpace::Normalized, CalibrationOffset::ZERO);
        let viewport = Viewport::new(100.0, 200.0);

        assert_eq!(
            mapper.map(&RawSample::new(0.0, 0.0), viewport),
            Ok(Point::new(0.0, 0.0))
        );
        assert_eq!(
            mapper.map(&RawSample::new(1.0, 1.0), viewport),
            Ok(Point::new(100.0, 200.0))
        );
        assert!(matches!(
            mapper.map(&RawSample::new(1.01, 0.5), viewport),
            Err(SampleError::OutOfRange { field: "x", .. })
        ));
        assert!(matches!(
            mapper.map(&RawSample::new(0.5, -0.1), viewport),
            Err(SampleError::OutOfRange { field: "y", .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected_before_range() {
        let mapper = CoordinateMapper::default();
        let viewport = Viewport::new(100.0, 100.0);
        assert_eq!(
            mapper.map(&RawSample::new(f64::NAN, 0.5), viewport),
            Err(SampleError::NonFinite { field: "x" })
        );
        assert_eq!(
            mapper.map(&RawSample::new(0.5, f64::NEG_INFINITY), viewport),
            Err(SampleError::NonFinite { field: "y" })
        );
    }

    #[test]
    fn test_pixel_space_checks_viewport_bounds() {
        let mapper = CoordinateMapper::new(SampleSpace::Pixels, CalibrationOffset::ZERO);
        let viewport = Viewport::new(80.0, 24.0);

        assert_eq!(
            mapper.map(&RawSample::new(40.5, 12.5), viewport),
            Ok(Point::new(40.5, 12.5))
        );
        assert!(mapper.map(&RawSample::new(81.0, 12.0), viewport).is_err());
    }

    #[test]
    fn test_offset_may_push_point_off_viewport() {
        let mapper = CoordinateMapper::default();
        let point = mapper
            .map(&RawSample::new(0.0, 1.0), Viewport::new(300.0, 600.0))
            .unwrap();
        assert_eq!(point, Point::new(-25.0, 625.0));
    }

    #[test]
    fn test_sample_space_serde() {
        assert_eq!(
            serde_json::to_string(&SampleSpace::Pixels).unwrap(),
            "\"pixels\""
        );
    }
}
