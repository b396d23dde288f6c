//! Runs a [`DwellEngine`] in its own tokio task.
//!
//! The task multiplexes four inputs with `tokio::select!`:
//!
//! - commands from the [`EngineHandle`] (resize, manual activation, shutdown)
//! - samples from the position source
//! - connection state changes of the position source
//! - a progress tick, so the countdown advances between samples
//!
//! After each input it publishes an [`EngineSnapshot`] on a watch channel.
//! Losing the source connection counts as a miss: focus is dropped rather
//! than left to count down on a stale position.

mod handle;

pub use handle::{EngineCommand, EngineHandle};

use std::time::Instant;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::DwellConfig;
use crate::dwell::{DwellEngine, EngineSnapshot};
use crate::keypad::Viewport;
use crate::sample::TimedSample;
use crate::traits::{ActivationHandler, PositionSource, SourceState};

/// Start an engine task fed by `source`, delivering activations to `handler`.
///
/// Subscribes to `source` before returning, so every sample sent after this
/// call reaches the engine. Must be called from within a tokio runtime.
///
/// # Example
///
/// ```ignore
/// use dwellpad::adapters::PointerSource;
/// use dwellpad::config::DwellConfig;
/// use dwellpad::keypad::Viewport;
/// use dwellpad::runtime::spawn_engine;
/// use dwellpad::text_buffer::TextBuffer;
///
/// let source = PointerSource::new(std::time::Duration::from_millis(100));
/// let handle = spawn_engine(
///     &DwellConfig::terminal(),
///     Viewport::from_cells(80, 24),
///     &source,
///     TextBuffer::new(),
/// );
/// let buffer = handle.shutdown().await?;
/// ```
pub fn spawn_engine<S, H>(
    config: &DwellConfig,
    viewport: Viewport,
    source: &S,
    handler: H,
) -> EngineHandle<H>
where
    S: PositionSource + ?Sized,
    H: ActivationHandler + Send + 'static,
{
    let engine = DwellEngine::new(config, viewport, handler);
    let samples = source.subscribe();
    let source_state = source.state();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) =
        watch::channel(EngineSnapshot::idle(config.dwell_threshold, viewport));

    info!(
        threshold_ms = config.dwell_threshold.as_millis() as u64,
        keys = config.keys.len(),
        "Starting dwell engine"
    );
    let task = tokio::spawn(run_engine(
        engine,
        samples,
        source_state,
        command_rx,
        snapshot_tx,
        config.tick_interval,
    ));

    EngineHandle::new(command_tx, snapshot_rx, task)
}

/// Current time on tokio's clock, so paused-time tests stay consistent.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn run_engine<H: ActivationHandler>(
    mut engine: DwellEngine<H>,
    mut samples: broadcast::Receiver<TimedSample>,
    mut source_state: watch::Receiver<SourceState>,
    mut commands: mpsc::UnboundedReceiver<EngineCommand>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
    tick_interval: std::time::Duration,
) -> H {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut samples_open = true;
    let mut state_open = true;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(EngineCommand::Resize(viewport)) => engine.resize(viewport),
                Some(EngineCommand::ActivateNow(key)) => {
                    engine.activate_now(key, now());
                }
                Some(EngineCommand::Shutdown) | None => {
                    debug!("Engine shutdown requested");
                    break;
                }
            },

            sample = samples.recv(), if samples_open => match sample {
                Ok(sample) => {
                    engine.on_sample(&sample);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Engine fell behind the position source");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("Position source closed");
                    samples_open = false;
                }
            },

            changed = source_state.changed(), if state_open => match changed {
                Ok(()) => {
                    let state = *source_state.borrow_and_update();
                    info!(state = %state.label(), "Position source state changed");
                    if state != SourceState::Connected {
                        engine.on_point(None, now());
                    }
                }
                Err(_) => state_open = false,
            },

            _ = ticker.tick() => {}
        }

        snapshot_tx.send_replace(engine.snapshot(now()));
    }

    engine.shutdown();
    snapshot_tx.send_replace(engine.snapshot(now()));
    info!("Dwell engine stopped");
    engine.into_handler()
}
