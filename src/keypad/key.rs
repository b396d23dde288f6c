//! Key identities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A key on the dwell keypad.
///
/// The engine treats every key identically; only the activation handler
/// gives `Clear` and `Space` their special meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A digit `0`-`9`. Construct with [`Key::digit`].
    Digit(u8),
    /// Empties the text buffer.
    Clear,
    /// Appends a separator.
    Space,
}

/// Reading order of the reference keypad: three digit rows, then
/// `CLEAR 0 SPACE` on the bottom row.
pub const KEYPAD_ORDER: [Key; 12] = [
    Key::Digit(1),
    Key::Digit(2),
    Key::Digit(3),
    Key::Digit(4),
    Key::Digit(5),
    Key::Digit(6),
    Key::Digit(7),
    Key::Digit(8),
    Key::Digit(9),
    Key::Clear,
    Key::Digit(0),
    Key::Space,
];

impl Key {
    /// Create a digit key, or `None` if `value > 9`.
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(Key::Digit(value))
    }

    /// The label shown on the key and used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Key::Digit(d) => DIGIT_LABELS.get(*d as usize).copied().unwrap_or("?"),
            Key::Clear => "CLEAR",
            Key::Space => "SPACE",
        }
    }

    /// Check if this is a digit key.
    pub fn is_digit(&self) -> bool {
        matches!(self, Key::Digit(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLEAR" => Ok(Key::Clear),
            "SPACE" => Ok(Key::Space),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Ok(Key::Digit(c as u8 - b'0')),
                    _ => Err(format!("unknown key `{}`", s)),
                }
            }
        }
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.label().to_string()
    }
}
