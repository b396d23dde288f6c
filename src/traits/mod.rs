//! Trait abstractions for dependency injection and testability.
//!
//! The engine never reaches for a global connection or buffer. It is handed
//! a [`PositionSource`] and an [`ActivationHandler`] when it is built, so
//! tests can substitute the mocks in [`crate::adapters::mock`].
//!
//! # Traits
//!
//! - [`PositionSource`] - asynchronous stream of gaze samples
//! - [`ActivationHandler`] - consumer of key activations

pub mod activation;
pub mod position_source;

pub use activation::ActivationHandler;
pub use position_source::{PositionSource, SourceState};
