//! Websocket position source for the gaze estimator.
//!
//! The estimator pushes one text frame per gaze estimate. Two shapes are
//! accepted:
//!
//! ```text
//! {"x": 0.42, "y": 0.61}
//! ["response", {"x": 0.42, "y": 0.61}]
//! ```
//!
//! The second is an event envelope; events other than `response` are
//! ignored. Text that is not JSON at all is logged and skipped. JSON with a
//! bad position payload is forwarded as a malformed sample so the engine
//! counts it as a miss.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use crate::config::EstimatorConfig;
use crate::error::{SampleError, SourceError};
use crate::sample::{RawSample, TimedSample};
use crate::traits::{PositionSource, SourceState};

/// Capacity of the sample broadcast channel.
pub const SAMPLE_CHANNEL_CAPACITY: usize = 256;

/// Name of the estimator event that carries a position.
pub const RESPONSE_EVENT: &str = "response";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One decoded estimator frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorFrame {
    /// A position payload, possibly malformed.
    Position(Result<RawSample, SampleError>),
    /// A named event that does not carry a position.
    Event(String),
    /// Text that is not JSON.
    Garbage(String),
}

/// Decode a text frame from the estimator.
pub fn parse_estimator_frame(text: &str) -> EstimatorFrame {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return EstimatorFrame::Garbage(e.to_string()),
    };

    match value {
        Value::Array(items) => match items.first() {
            Some(Value::String(name)) if name == RESPONSE_EVENT => {
                let payload = items.get(1).ok_or_else(|| SampleError::Unparseable {
                    message: "response event without payload".to_string(),
                });
                EstimatorFrame::Position(payload.and_then(RawSample::from_json))
            }
            Some(Value::String(name)) => EstimatorFrame::Event(name.clone()),
            _ => EstimatorFrame::Position(Err(SampleError::Unparseable {
                message: "event array without a name".to_string(),
            })),
        },
        other => EstimatorFrame::Position(RawSample::from_json(&other)),
    }
}

/// Position source backed by a websocket connection to the estimator.
///
/// Reconnects with exponential backoff when the connection drops and gives
/// up after `max_retries` attempts, leaving the state at `Disconnected`.
///
/// # Example
///
/// ```ignore
/// use dwellpad::adapters::EstimatorSource;
/// use dwellpad::config::EstimatorConfig;
/// use dwellpad::traits::PositionSource;
///
/// let source = EstimatorSource::connect(EstimatorConfig::default()).await?;
/// let mut samples = source.subscribe();
/// while let Ok(sample) = samples.recv().await {
///     println!("{:?}", sample.payload);
/// }
/// ```
pub struct EstimatorSource {
    samples_tx: broadcast::Sender<TimedSample>,
    state_rx: watch::Receiver<SourceState>,
    shutdown_tx: watch::Sender<bool>,
}

impl EstimatorSource {
    /// Connect to the estimator and start forwarding samples.
    ///
    /// Fails if the URL is not a websocket URL or the first connection
    /// attempt fails. Later failures are handled by reconnecting.
    pub async fn connect(config: EstimatorConfig) -> Result<Self, SourceError> {
        if !(config.url.starts_with("ws://") || config.url.starts_with("wss://")) {
            return Err(SourceError::InvalidUrl(config.url));
        }

        let (stream, _) = connect_async(config.url.as_str())
            .await
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;
        info!(url = %config.url, "Connected to gaze estimator");

        let (samples_tx, _) = broadcast::channel(SAMPLE_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(SourceState::Connected);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(run_connection_loop(
            config,
            stream,
            samples_tx.clone(),
            state_tx,
            shutdown_rx,
        ));

        Ok(Self {
            samples_tx,
            state_rx,
            shutdown_tx,
        })
    }

    /// Current connection state.
    pub fn connection_state(&self) -> SourceState {
        *self.state_rx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == SourceState::Connected
    }
}

#[async_trait]
impl PositionSource for EstimatorSource {
    fn subscribe(&self) -> broadcast::Receiver<TimedSample> {
        self.samples_tx.subscribe()
    }

    fn state(&self) -> watch::Receiver<SourceState> {
        self.state_rx.clone()
    }

    fn shutdown(&self) {
        info!("Shutting down estimator connection");
        let _ = self.shutdown_tx.send(true);
    }
}

/// Receive frames until shutdown, reconnecting when the connection drops.
async fn run_connection_loop(
    config: EstimatorConfig,
    mut stream: WsStream,
    samples_tx: broadcast::Sender<TimedSample>,
    state_tx: watch::Sender<SourceState>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        let lost = tokio::select! {
            // Also fires when the source is dropped
            _ = shutdown_rx.changed() => {
                debug!("Shutdown signal received, closing estimator connection");
                let _ = stream.close(None).await;
                break;
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    forward_frame(&text, &samples_tx);
                    false
                }
                Some(Ok(Message::Ping(data))) => {
                    let _ = stream.send(Message::Pong(data)).await;
                    false
                }
                Some(Ok(Message::Close(_))) => {
                    info!("Estimator closed the connection");
                    true
                }
                Some(Ok(_)) => false,
                Some(Err(e)) => {
                    warn!("Estimator connection error: {}", e);
                    true
                }
                None => {
                    info!("Estimator stream ended");
                    true
                }
            },
        };

        if lost {
            let _ = state_tx.send(SourceState::Disconnected);
            match attempt_reconnect(&config, &state_tx, &mut shutdown_rx).await {
                Some(new_stream) => {
                    stream = new_stream;
                    let _ = state_tx.send(SourceState::Connected);
                }
                None => break,
            }
        }
    }

    info!("Estimator connection loop ended");
    let _ = state_tx.send(SourceState::Disconnected);
}

fn forward_frame(text: &str, samples_tx: &broadcast::Sender<TimedSample>) {
    match parse_estimator_frame(text) {
        EstimatorFrame::Position(payload) => {
            // No subscribers is fine
            let _ = samples_tx.send(TimedSample::now(payload));
        }
        EstimatorFrame::Event(name) => debug!(event = %name, "Ignoring estimator event"),
        EstimatorFrame::Garbage(reason) => {
            warn!("Skipping unparseable estimator frame: {} - {}", reason, text)
        }
    }
}

/// Reconnect with exponential backoff. `None` means give up.
async fn attempt_reconnect(
    config: &EstimatorConfig,
    state_tx: &watch::Sender<SourceState>,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> Option<WsStream> {
    for attempt in 1..=config.max_retries {
        if *shutdown_rx.borrow() {
            return None;
        }
        let _ = state_tx.send(SourceState::Reconnecting { attempt });

        let backoff = config.backoff(attempt);
        info!(
            "Reconnection attempt {} of {}, waiting {}s",
            attempt,
            config.max_retries,
            backoff.as_secs()
        );
        tokio::select! {
            _ = tokio::time::sleep(backoff) => {}
            _ = shutdown_rx.changed() => {
                debug!("Shutdown requested during backoff");
                return None;
            }
        }

        match connect_async(config.url.as_str()).await {
            Ok((stream, _)) => {
                info!("Reconnected to estimator on attempt {}", attempt);
                return Some(stream);
            }
            Err(e) => warn!("Reconnection attempt {} failed: {}", attempt, e),
        }
    }

    error!(
        "Failed to reconnect after {} attempts, giving up",
        config.max_retries
    );
    None
}
