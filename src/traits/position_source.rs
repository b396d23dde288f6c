//! Position source trait abstraction.
//!
//! A position source pushes [`TimedSample`]s to any number of subscribers
//! over a tokio broadcast channel and reports its connection state through a
//! watch channel, the same shape as a websocket client.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::error::SourceError;
use crate::sample::TimedSample;

/// Connection state of a position source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Connected,
    Reconnecting { attempt: u8 },
    Disconnected,
}

impl SourceState {
    /// Short label for the status line.
    pub fn label(&self) -> String {
        match self {
            SourceState::Connected => "connected".to_string(),
            SourceState::Reconnecting { attempt } => format!("reconnecting ({})", attempt),
            SourceState::Disconnected => "disconnected".to_string(),
        }
    }
}

/// Asynchronous source of gaze samples.
///
/// # Example
///
/// ```ignore
/// use dwellpad::traits::{PositionSource, SourceState};
///
/// async fn follow<S: PositionSource>(source: &S) {
///     let mut rx = source.subscribe();
///     while let Ok(sample) = rx.recv().await {
///         println!("{:?}", sample.payload);
///     }
/// }
/// ```
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Subscribe to samples.
    ///
    /// Each receiver gets every sample sent after it subscribed.
    fn subscribe(&self) -> broadcast::Receiver<TimedSample>;

    /// Receiver for connection state changes.
    fn state(&self) -> watch::Receiver<SourceState>;

    /// Stop producing samples and release the connection.
    fn shutdown(&self);

    /// Wait until the source reports `Connected`.
    ///
    /// Fails with [`SourceError::Timeout`] if that does not happen within
    /// `timeout`, or [`SourceError::Disconnected`] if the source goes away.
    async fn wait_until_connected(&self, timeout: Duration) -> Result<(), SourceError> {
        let mut state = self.state();
        let connected = async move {
            state
                .wait_for(|s| *s == SourceState::Connected)
                .await
                .map(|_| ())
        };
        match tokio::time::timeout(timeout, connected).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(_)) => Err(SourceError::Disconnected),
            Err(_) => Err(SourceError::Timeout(timeout.as_millis() as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(SourceState::Connected.label(), "connected");
        assert_eq!(
            SourceState::Reconnecting { attempt: 3 }.label(),
            "reconnecting (3)"
        );
        assert_eq!(SourceState::Disconnected.label(), "disconnected");
    }
}
