//! Background grid, cursor dot and dwell countdown.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
    Frame,
};

use super::theme::{COLOR_CURSOR, COLOR_GRID};
use crate::dwell::DwellProgress;
use crate::keypad::{Layout, Point};

/// Columns between vertical grid lines.
pub const GRID_COLUMN_STEP: u16 = 10;
/// Rows between horizontal grid lines.
pub const GRID_ROW_STEP: u16 = 5;

pub const CURSOR_SYMBOL: &str = "●";

/// Faint alignment grid drawn behind everything else.
pub struct GridOverlay;

impl Widget for GridOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(COLOR_GRID);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let on_column = (x - area.x) % GRID_COLUMN_STEP == 0;
                let on_row = (y - area.y) % GRID_ROW_STEP == 0;
                let symbol = match (on_column, on_row) {
                    (true, true) => "┼",
                    (true, false) => "┊",
                    (false, true) => "┈",
                    (false, false) => continue,
                };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

/// Cell under a cursor position, if it is on screen.
pub fn cursor_cell(cursor: Point, area: Rect) -> Option<(u16, u16)> {
    if !cursor.is_finite() {
        return None;
    }
    let (x, y) = (cursor.x.floor(), cursor.y.floor());
    let inside = x >= f64::from(area.left())
        && x < f64::from(area.right())
        && y >= f64::from(area.top())
        && y < f64::from(area.bottom());
    inside.then_some((x as u16, y as u16))
}

/// Draw the red cursor dot.
pub fn render_cursor(frame: &mut Frame, cursor: Option<Point>) {
    let area = frame.area();
    let Some((x, y)) = cursor.and_then(|c| cursor_cell(c, area)) else {
        return;
    };
    if let Some(cell) = frame.buffer_mut().cell_mut((x, y)) {
        cell.set_symbol(CURSOR_SYMBOL)
            .set_style(Style::default().fg(COLOR_CURSOR));
    }
}

/// Draw `"<key>: <remaining>s"` two rows above the keypad.
pub fn render_countdown(frame: &mut Frame, layout: &Layout, progress: &DwellProgress) {
    let Some(label) = progress.countdown_label() else {
        return;
    };
    let area = frame.area();
    let keypad_top = layout
        .iter()
        .map(|entry| entry.rect.top)
        .fold(f64::INFINITY, f64::min);
    if !keypad_top.is_finite() || keypad_top < 2.0 {
        return;
    }

    let row = (keypad_top as u16 - 2).min(area.bottom().saturating_sub(1));
    let line = Rect::new(area.x, row, area.width, 1);
    let text = Paragraph::new(Span::styled(
        label,
        Style::default()
            .fg(COLOR_CURSOR)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(text, line);
}
