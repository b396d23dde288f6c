//! Color theme for the keypad.

use ratatui::style::Color;

/// Key background
pub const COLOR_KEY: Color = Color::Rgb(0, 123, 255);

/// Background of the key under the cursor
pub const COLOR_KEY_FOCUSED: Color = Color::Rgb(255, 215, 0);

/// Key label text
pub const COLOR_KEY_TEXT: Color = Color::White;

/// Key label text on the focused key
pub const COLOR_KEY_FOCUSED_TEXT: Color = Color::Black;

/// Cursor dot and countdown
pub const COLOR_CURSOR: Color = Color::Red;

/// Background grid lines
pub const COLOR_GRID: Color = Color::DarkGray;

/// Text bar background
pub const COLOR_TEXT_BAR_BG: Color = Color::Black;

/// Text bar border
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Status line and hints
pub const COLOR_DIM: Color = Color::Gray;

/// Source connected indicator
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Source reconnecting or disconnected indicator
pub const COLOR_WARNING: Color = Color::Yellow;
