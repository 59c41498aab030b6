//! Hero pane: the previewed logo under parallax and pulse transforms.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::document::Document;
use crate::core::view::{NodeId, View};
use crate::ui::element::{render_element, Assets};
use crate::ui::layout::{inset, px_to_cells, scale_about_center, shift_within};
use crate::ui::theme::Theme;

pub struct HeroWidget<'a> {
    pub doc: &'a Document,
    pub hero: NodeId,
    pub now: Instant,
    pub assets: Assets<'a>,
}

impl<'a> Widget for HeroWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Preview ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = inset(area);
        block.render(area, buf);

        let Some(content) = self.doc.children(self.hero).first().copied() else {
            let hint = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, inner.height.min(1));
            Paragraph::new("Click a logo to preview it here")
                .style(Theme::hint_style())
                .alignment(Alignment::Center)
                .render(hint, buf);
            return;
        };

        // Rotation has no cell equivalent; translation and scale do.
        let target = match self.doc.effective_transform(self.hero, self.now) {
            Some(t) => {
                let (dx, dy) = px_to_cells(t.translate_x, t.translate_y);
                shift_within(scale_about_center(inner, t.scale), dx, dy, inner)
            }
            None => inner,
        };
        render_element(self.doc, content, target, self.assets, buf);
    }
}
