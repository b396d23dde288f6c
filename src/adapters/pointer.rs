//! Terminal pointer as a position source.
//!
//! Mouse movement reported by the terminal is turned into pixel-space
//! samples at the center of the cell under the pointer, so a cell on a key
//! border hit-tests the same way as the key itself.
//!
//! Terminals only report movement, so a pointer held still would stop
//! producing samples. A background task re-sends the last cell on a fixed
//! cadence until shutdown, which lets a dwell complete without motion.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::estimator::SAMPLE_CHANNEL_CAPACITY;
use crate::sample::{RawSample, TimedSample};
use crate::traits::{PositionSource, SourceState};

/// Position source fed by terminal mouse events.
pub struct PointerSource {
    samples_tx: broadcast::Sender<TimedSample>,
    state_tx: watch::Sender<SourceState>,
    last_cell_tx: watch::Sender<Option<(u16, u16)>>,
}

impl PointerSource {
    /// Create the source and start repeating the last cell every `repeat`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(repeat: Duration) -> Self {
        let (samples_tx, _) = broadcast::channel(SAMPLE_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(SourceState::Connected);
        let (last_cell_tx, last_cell_rx) = watch::channel(None);

        tokio::spawn(repeat_last_cell(
            samples_tx.clone(),
            last_cell_rx,
            state_rx,
            repeat,
        ));

        Self {
            samples_tx,
            state_tx,
            last_cell_tx,
        }
    }

    /// Report the pointer over cell (`column`, `row`).
    ///
    /// Ignored after [`PositionSource::shutdown`].
    pub fn pointer_moved(&self, column: u16, row: u16) {
        if *self.state_tx.borrow() == SourceState::Disconnected {
            return;
        }
        self.last_cell_tx.send_replace(Some((column, row)));
        send_cell(&self.samples_tx, column, row);
    }
}

fn send_cell(samples_tx: &broadcast::Sender<TimedSample>, column: u16, row: u16) {
    let sample = RawSample::new(f64::from(column) + 0.5, f64::from(row) + 0.5);
    // No subscribers is fine
    let _ = samples_tx.send(TimedSample::now(Ok(sample)));
}

/// Re-send the last reported cell every `repeat` until the source stops.
async fn repeat_last_cell(
    samples_tx: broadcast::Sender<TimedSample>,
    last_cell_rx: watch::Receiver<Option<(u16, u16)>>,
    mut state_rx: watch::Receiver<SourceState>,
    repeat: Duration,
) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + repeat, repeat);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let last = *last_cell_rx.borrow();
                if let Some((column, row)) = last {
                    send_cell(&samples_tx, column, row);
                }
            }
            changed = state_rx.changed() => {
                // Err means the source was dropped
                if changed.is_err() || *state_rx.borrow() == SourceState::Disconnected {
                    break;
                }
            }
        }
    }
    debug!("Pointer repeat task stopped");
}

#[async_trait]
impl PositionSource for PointerSource {
    fn subscribe(&self) -> broadcast::Receiver<TimedSample> {
        self.samples_tx.subscribe()
    }

    fn state(&self) -> watch::Receiver<SourceState> {
        self.state_tx.subscribe()
    }

    fn shutdown(&self) {
        debug!("Pointer source stopped");
        self.state_tx.send_replace(SourceState::Disconnected);
    }
}
