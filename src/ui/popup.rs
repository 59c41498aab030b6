//! Popup overlay for alerts raised by the page.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

const ALERT_MAX_WIDTH: u16 = 52;

// ───────────────────────────────────────── alert popup ───────

/// Modal alert, dismissed by any key or click.
pub struct AlertPopup<'a> {
    pub message: &'a str,
}

impl<'a> Widget for AlertPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = ALERT_MAX_WIDTH.min(area.width);
        // Border + padding rows + wrapped message + blank + hint.
        let text_width = width.saturating_sub(4).max(1) as usize;
        let message_rows = self.message.chars().count().div_ceil(text_width).max(1) as u16;
        let popup = centered_fixed(width, message_rows + 6, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Alert ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                self.message,
                Style::default().fg(Color::White),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Enter / click: close",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
