//! Terminal events to keypad actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::App;
use crate::keypad::Key;

/// What the event loop should do in response to a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Quit,
    /// Activate a key directly (click or keyboard).
    Activate(Key),
    /// Pointer is over cell (`column`, `row`).
    PointerMoved { column: u16, row: u16 },
    /// Terminal resized to `columns` x `rows` cells.
    Resize { columns: u16, rows: u16 },
}

/// Map a terminal event to an action.
///
/// A left click on a key activates it; anywhere else it only moves the
/// pointer. The keyboard mirrors the keypad so it can be driven without a
/// pointer: digits, space, and backspace for CLEAR.
pub fn map_event(app: &App, event: &Event) -> AppAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::Mouse(mouse) => map_mouse(app, mouse),
        Event::Resize(columns, rows) => AppAction::Resize {
            columns: *columns,
            rows: *rows,
        },
        _ => AppAction::None,
    }
}

fn map_key(key: &KeyEvent) -> AppAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
        KeyCode::Char(' ') => AppAction::Activate(Key::Space),
        KeyCode::Backspace | KeyCode::Delete => AppAction::Activate(Key::Clear),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| Key::digit(d as u8))
            .map_or(AppAction::None, AppAction::Activate),
        _ => AppAction::None,
    }
}

fn map_mouse(app: &App, mouse: &MouseEvent) -> AppAction {
    let moved = AppAction::PointerMoved {
        column: mouse.column,
        row: mouse.row,
    };
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => moved,
        MouseEventKind::Down(MouseButton::Left) => app
            .key_at_cell(mouse.column, mouse.row)
            .map_or(moved, AppAction::Activate),
        _ => AppAction::None,
    }
}
