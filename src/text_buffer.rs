//! The typed text.

use crate::dwell::ActivationEvent;
use crate::error::HandlerError;
use crate::keypad::Key;
use crate::traits::ActivationHandler;

/// Text produced by key activations.
///
/// Digits append themselves, `SPACE` appends a space and `CLEAR` empties the
/// buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply one key press.
    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Digit(_) => self.text.push_str(key.label()),
            Key::Space => self.text.push(' '),
            Key::Clear => self.text.clear(),
        }
    }
}

impl ActivationHandler for TextBuffer {
    fn on_activate(&mut self, event: &ActivationEvent) -> Result<(), HandlerError> {
        self.apply(event.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sequence() {
        let mut buffer = TextBuffer::new();
        for key in [Key::Digit(1), Key::Digit(2), Key::Space, Key::Digit(0)] {
            buffer.apply(key);
        }
        assert_eq!(buffer.as_str(), "12 0");

        buffer.apply(Key::Clear);
        assert!(buffer.is_empty());

        buffer.apply(Key::Digit(7));
        assert_eq!(buffer.as_str(), "7");
    }

    #[test]
    fn test_clear_on_empty_buffer() {
        let mut buffer = TextBuffer::new();
        buffer.apply(Key::Clear);
        assert_eq!(buffer.as_str(), "");
    }
}
