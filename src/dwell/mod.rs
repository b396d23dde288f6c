//! Dwell selection: turning a stream of positions into key presses.
//!
//! # Architecture
//!
//! ```text
//!  TimedSample ──► CoordinateMapper ──► hit_test(Layout) ──► DwellTracker
//!                                                              │
//!                                     ActivationEvent ◄────────┘
//!                                            │
//!                                            ▼
//!                                   ActivationHandler
//! ```
//!
//! [`DwellTracker`] is the bare state machine (`Idle` / `Dwelling`).
//! [`DwellEngine`] owns the layout cache, the mapper, the tracker and the
//! handler, and is what the runtime drives one sample at a time.

mod engine;
mod event;
mod progress;
mod tracker;

pub use engine::DwellEngine;
pub use event::{ActivationEvent, ActivationSource};
pub use progress::{DwellProgress, EngineSnapshot};
pub use tracker::{DwellState, DwellTracker, DEFAULT_DWELL_THRESHOLD};
