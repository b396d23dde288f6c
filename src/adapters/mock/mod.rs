//! Mock implementations for testing.
//!
//! - [`MockPositionSource`] - position source with sample injection
//! - [`RecordingHandler`] - activation handler that records what it gets

pub mod handler;
pub mod position;

pub use handler::RecordingHandler;
pub use position::MockPositionSource;
