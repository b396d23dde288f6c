//! Concrete implementations of the trait abstractions.
//!
//! # Adapters
//!
//! - [`EstimatorSource`] - gaze estimator over a websocket (tokio-tungstenite)
//! - [`PointerSource`] - terminal mouse position
//! - [`ChannelHandler`] - forwards activations over an mpsc channel
//!
//! The [`mock`] submodule provides test doubles.

pub mod channel_handler;
pub mod estimator;
pub mod mock;
pub mod pointer;

pub use channel_handler::ChannelHandler;
pub use estimator::{parse_estimator_frame, EstimatorFrame, EstimatorSource};
pub use mock::{MockPositionSource, RecordingHandler};
pub use pointer::PointerSource;
