//! Prelude module for convenient imports.
//!
//! ```ignore
//! use dwellpad::prelude::*;
//! ```

// Engine
pub use crate::config::DwellConfig;
pub use crate::dwell::{ActivationEvent, ActivationSource, DwellEngine, DwellProgress, EngineSnapshot};
pub use crate::runtime::{spawn_engine, EngineHandle};

// Keypad geometry
pub use crate::keypad::{compute_layout, hit_test, Key, Layout, LayoutMetrics, Point, Rect, Viewport};

// Samples
pub use crate::sample::{CalibrationOffset, CoordinateMapper, RawSample, SampleSpace, TimedSample};

// Seams
pub use crate::traits::{ActivationHandler, PositionSource, SourceState};
pub use crate::text_buffer::TextBuffer;

// Errors
pub use crate::error::{DwellpadError, DwellpadResult};
