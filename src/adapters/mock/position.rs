//! Mock position source for testing.
//!
//! Samples are injected by hand and delivered to all subscribers, and the
//! connection state can be driven directly.

use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::error::SampleError;
use crate::sample::{RawSample, TimedSample};
use crate::traits::{PositionSource, SourceState};

/// Mock position source.
///
/// # Example
///
/// ```ignore
/// use dwellpad::adapters::mock::MockPositionSource;
/// use dwellpad::sample::RawSample;
/// use dwellpad::traits::PositionSource;
///
/// let mock = MockPositionSource::new();
/// let mut rx = mock.subscribe();
/// mock.inject_sample(RawSample::new(0.5, 0.5), std::time::Instant::now());
/// let sample = rx.recv().await?;
/// ```
#[derive(Clone)]
pub struct MockPositionSource {
    samples_tx: broadcast::Sender<TimedSample>,
    state_tx: watch::Sender<SourceState>,
    state_rx: watch::Receiver<SourceState>,
}

impl MockPositionSource {
    /// Create a mock source in connected state.
    pub fn new() -> Self {
        Self::with_state(SourceState::Connected)
    }

    /// Create a mock source in disconnected state.
    pub fn disconnected() -> Self {
        Self::with_state(SourceState::Disconnected)
    }

    fn with_state(state: SourceState) -> Self {
        let (samples_tx, _) = broadcast::channel(1024);
        let (state_tx, state_rx) = watch::channel(state);
        Self {
            samples_tx,
            state_tx,
            state_rx,
        }
    }

    /// Deliver a prepared sample to all subscribers.
    pub fn inject(&self, sample: TimedSample) {
        // No subscribers is fine
        let _ = self.samples_tx.send(sample);
    }

    /// Deliver a valid sample stamped `at`.
    pub fn inject_sample(&self, sample: RawSample, at: Instant) {
        self.inject(TimedSample::new(sample, at));
    }

    /// Deliver a malformed sample stamped `at`.
    pub fn inject_malformed(&self, error: SampleError, at: Instant) {
        self.inject(TimedSample::malformed(error, at));
    }

    pub fn set_state(&self, state: SourceState) {
        let _ = self.state_tx.send(state);
    }

    pub fn simulate_disconnect(&self) {
        self.set_state(SourceState::Disconnected);
    }

    pub fn simulate_reconnecting(&self, attempt: u8) {
        self.set_state(SourceState::Reconnecting { attempt });
    }

    pub fn simulate_reconnected(&self) {
        self.set_state(SourceState::Connected);
    }

    /// Number of live sample subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.samples_tx.receiver_count()
    }
}

impl Default for MockPositionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PositionSource for MockPositionSource {
    fn subscribe(&self) -> broadcast::Receiver<TimedSample> {
        self.samples_tx.subscribe()
    }

    fn state(&self) -> watch::Receiver<SourceState> {
        self.state_rx.clone()
    }

    fn shutdown(&self) {
        let _ = self.state_tx.send(SourceState::Disconnected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_injected_samples_reach_subscribers() {
        let mock = MockPositionSource::new();
        let mut rx = mock.subscribe();
        let now = Instant::now();

        mock.inject_sample(RawSample::new(0.1, 0.2), now);
        mock.inject_malformed(SampleError::NonFinite { field: "y" }, now);

        assert_eq!(rx.recv().await.unwrap().payload, Ok(RawSample::new(0.1, 0.2)));
        assert!(rx.recv().await.unwrap().payload.is_err());
    }

    #[tokio::test]
    async fn test_state_changes() {
        let mock = MockPositionSource::disconnected();
        let state = mock.state();
        assert_eq!(*state.borrow(), SourceState::Disconnected);

        mock.simulate_reconnecting(2);
        assert_eq!(*state.borrow(), SourceState::Reconnecting { attempt: 2 });

        mock.simulate_reconnected();
        assert!(mock
            .wait_until_connected(Duration::from_millis(10))
            .await
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_connected_times_out() {
        let mock = MockPositionSource::disconnected();
        let result = mock.wait_until_connected(Duration::from_secs(1)).await;
        assert_eq!(result, Err(crate::error::SourceError::Timeout(1000)));
    }

    #[test]
    fn test_subscriber_count() {
        let mock = MockPositionSource::new();
        assert_eq!(mock.subscriber_count(), 0);
        let _rx = mock.subscribe();
        assert_eq!(mock.subscriber_count(), 1);
    }
}
