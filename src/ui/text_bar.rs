//! Typed-text bar and status line.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_KEY_TEXT, COLOR_TEXT_BAR_BG, COLOR_WARNING,
};
use crate::app::App;
use crate::traits::SourceState;

/// Height of the text bar including borders.
pub const TEXT_BAR_HEIGHT: u16 = 3;

/// Area of the text bar: one row down, two columns in from each side.
pub fn text_bar_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4);
    let height = TEXT_BAR_HEIGHT.min(area.height.saturating_sub(1));
    Rect::new(
        area.x + 2u16.min(area.width),
        area.y + 1u16.min(area.height),
        width,
        height,
    )
}

/// Draw the typed text, keeping its tail visible when it overflows.
pub fn render_text_bar(frame: &mut Frame, app: &App) {
    let area = text_bar_area(frame.area());
    if area.width < 3 || area.height < TEXT_BAR_HEIGHT {
        return;
    }

    let inner_width = usize::from(area.width - 2);
    let text = app.buffer().as_str();
    // Buffer is ASCII: digits and spaces
    let visible = &text[text.len().saturating_sub(inner_width)..];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_TEXT_BAR_BG));
    let paragraph = Paragraph::new(Span::styled(
        visible.to_string(),
        Style::default()
            .fg(COLOR_KEY_TEXT)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Draw the source and key hints on the last row.
pub fn render_status_line(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let line_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);

    let state = app.source_state();
    let state_color = match state {
        SourceState::Connected => COLOR_ACTIVE,
        SourceState::Reconnecting { .. } | SourceState::Disconnected => COLOR_WARNING,
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.source_name()), Style::default().fg(COLOR_DIM)),
        Span::styled(state.label(), Style::default().fg(state_color)),
        Span::styled("  q quit", Style::default().fg(COLOR_DIM)),
    ]);

    frame.render_widget(Clear, line_area);
    frame.render_widget(Paragraph::new(line), line_area);
}
