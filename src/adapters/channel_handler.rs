//! Activation handler that forwards events over a channel.

use tokio::sync::mpsc;

use crate::dwell::ActivationEvent;
use crate::error::HandlerError;
use crate::traits::ActivationHandler;

/// Forwards every activation to an unbounded mpsc channel.
///
/// Lets the engine run in its own task while the UI applies activations to
/// its own state.
#[derive(Debug, Clone)]
pub struct ChannelHandler {
    tx: mpsc::UnboundedSender<ActivationEvent>,
}

impl ChannelHandler {
    pub fn new(tx: mpsc::UnboundedSender<ActivationEvent>) -> Self {
        Self { tx }
    }

    /// Create a handler together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ActivationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ActivationHandler for ChannelHandler {
    fn on_activate(&mut self, event: &ActivationEvent) -> Result<(), HandlerError> {
        self.tx
            .send(*event)
            .map_err(|_| HandlerError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::Key;
    use std::time::Instant;

    #[test]
    fn test_forwards_events() {
        let (mut handler, mut rx) = ChannelHandler::channel();
        let event = ActivationEvent::dwell(Key::Digit(3), Instant::now());

        handler.on_activate(&event).unwrap();
        assert_eq!(rx.try_recv().unwrap(), event);
    }

    #[test]
    fn test_closed_channel_is_reported() {
        let (mut handler, rx) = ChannelHandler::channel();
        drop(rx);

        let event = ActivationEvent::manual(Key::Space, Instant::now());
        assert_eq!(handler.on_activate(&event), Err(HandlerError::ChannelClosed));
    }
}
