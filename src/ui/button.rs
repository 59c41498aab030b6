//! Button element widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::document::Document;
use crate::core::view::{ElementKind, NodeId, View};
use crate::ui::theme::Theme;

pub struct ButtonWidget<'a> {
    pub doc: &'a Document,
    pub button: NodeId,
}

impl<'a> Widget for ButtonWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ElementKind::Button { label } = self.doc.kind(self.button) else {
            return;
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(format!("▶ {label}"))
            .style(Theme::play_style())
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
