//! Terminal rendering of the keypad.
//!
//! Layers, back to front:
//!
//! 1. background grid
//! 2. text bar with the typed text
//! 3. keypad, focused key highlighted
//! 4. countdown above the keypad
//! 5. status line
//! 6. cursor dot

mod keypad;
mod overlay;
mod text_bar;
mod theme;

pub use keypad::{cell_area, render_keypad};
pub use overlay::{cursor_cell, render_countdown, render_cursor, GridOverlay, CURSOR_SYMBOL};
pub use text_bar::{render_status_line, render_text_bar, text_bar_area};
pub use theme::*;

use ratatui::Frame;

use crate::app::App;

/// Render one frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let snapshot = app.snapshot();

    frame.render_widget(GridOverlay, area);
    render_text_bar(frame, app);
    render_keypad(frame, app.layout(), snapshot.progress.focused);
    render_countdown(frame, app.layout(), &snapshot.progress);
    render_status_line(frame, app);
    render_cursor(frame, snapshot.cursor);
}
