//! Keypad rendering.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::{COLOR_KEY, COLOR_KEY_FOCUSED, COLOR_KEY_FOCUSED_TEXT, COLOR_KEY_TEXT};
use crate::keypad::{self, Key, Layout};

/// Cells whose centers fall inside `rect`, clipped to `bounds`.
///
/// Uses the same cell-center rule as the pointer source, so what is drawn
/// is exactly what hit-tests as the key.
pub fn cell_area(rect: &keypad::Rect, bounds: Rect) -> Option<Rect> {
    let x0 = (rect.left - 0.5).ceil().max(f64::from(bounds.x));
    let x1 = (rect.right() - 0.5)
        .floor()
        .min(f64::from(bounds.right()) - 1.0);
    let y0 = (rect.top - 0.5).ceil().max(f64::from(bounds.y));
    let y1 = (rect.bottom() - 0.5)
        .floor()
        .min(f64::from(bounds.bottom()) - 1.0);

    if !(x0 <= x1 && y0 <= y1) {
        return None;
    }
    Some(Rect::new(
        x0 as u16,
        y0 as u16,
        (x1 - x0) as u16 + 1,
        (y1 - y0) as u16 + 1,
    ))
}

/// Draw every key, highlighting `focused`.
pub fn render_keypad(frame: &mut Frame, layout: &Layout, focused: Option<Key>) {
    let bounds = frame.area();
    for entry in layout.iter() {
        let Some(area) = cell_area(&entry.rect, bounds) else {
            continue;
        };
        let (bg, fg) = if focused == Some(entry.key) {
            (COLOR_KEY_FOCUSED, COLOR_KEY_FOCUSED_TEXT)
        } else {
            (COLOR_KEY, COLOR_KEY_TEXT)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(bg).fg(fg));
        let label = Paragraph::new(entry.key.label())
            .alignment(Alignment::Center)
            .style(Style::default().fg(fg).add_modifier(Modifier::BOLD))
            .block(block);

        frame.render_widget(Clear, area);
        frame.render_widget(label, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_area_matches_cell_centers() {
        let bounds = Rect::new(0, 0, 80, 24);
        let area = cell_area(&keypad::Rect::new(2.0, 7.0, 24.0, 3.0), bounds).unwrap();
        assert_eq!(area, Rect::new(2, 7, 24, 3));
    }

    #[test]
    fn test_cell_area_fractional_edges() {
        let bounds = Rect::new(0, 0, 100, 30);
        // [27.5, 57.5] covers cells 27..=57 (centers 27.5..=57.5)
        let area = cell_area(&keypad::Rect::new(27.5, 10.0, 30.0, 3.0), bounds).unwrap();
        assert_eq!(area.x, 27);
        assert_eq!(area.width, 31);
    }

    #[test]
    fn test_cell_area_clips_and_rejects_offscreen() {
        let bounds = Rect::new(0, 0, 20, 10);
        let clipped = cell_area(&keypad::Rect::new(15.0, -2.0, 10.0, 4.0), bounds).unwrap();
        assert_eq!(clipped, Rect::new(15, 0, 5, 2));

        assert!(cell_area(&keypad::Rect::new(30.0, 2.0, 5.0, 2.0), bounds).is_none());
        assert!(cell_area(&keypad::Rect::new(2.0, 2.0, 0.2, 2.0), bounds).is_none());
    }
}
