//! dwellpad - a hands-free keypad driven by a gaze position stream.
//!
//! Position samples go through [`dwell::DwellEngine`], which hit-tests them
//! against the [`keypad`] layout and fires a key once the cursor has rested
//! on it for the dwell threshold. The library exposes the engine and its
//! adapters for the terminal binary and for integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod dwell;
pub mod error;
pub mod keypad;
pub mod logging;
pub mod prelude;
pub mod runtime;
pub mod sample;
pub mod terminal;
pub mod text_buffer;
pub mod traits;
pub mod ui;
