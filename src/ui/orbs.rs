//! Background orb field, blended into the page background.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

use crate::core::document::Document;
use crate::core::placeholder::gradient_at;
use crate::core::view::{ElementKind, NodeId, View};
use crate::ui::layout::{cell_center_px, rect_to_px, CELL_H_PX, CELL_W_PX};
use crate::ui::theme::{blend, rgb, Theme};

/// Orbs layer drawn underneath every other widget.
pub struct OrbField<'a> {
    pub doc: &'a Document,
    pub orbs: NodeId,
    pub now: Instant,
}

impl<'a> Widget for OrbField<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let page = rect_to_px(area);
        let children = self.doc.children(self.orbs);
        let count = children.len();

        for (i, orb) in children.into_iter().enumerate() {
            let ElementKind::Orb(spec) = self.doc.kind(orb) else {
                continue;
            };
            let transform = self.doc.effective_transform(orb, self.now).unwrap_or_default();
            let radius = spec.size_px / 2.0 * transform.scale;
            if radius <= 0.0 {
                continue;
            }
            let cx = page.x + page.width * spec.left_pct / 100.0 + spec.size_px / 2.0 + transform.translate_x;
            let cy = page.y + page.height * spec.top_pct / 100.0 + spec.size_px / 2.0 + transform.translate_y;
            let colour = gradient_at(if count > 1 { i as f64 / (count - 1) as f64 } else { 0.0 });

            let bounds = Rect::new(
                ((cx - radius) / CELL_W_PX).floor().max(0.0) as u16,
                ((cy - radius) / CELL_H_PX).floor().max(0.0) as u16,
                (2.0 * radius / CELL_W_PX).ceil() as u16 + 1,
                (2.0 * radius / CELL_H_PX).ceil() as u16 + 1,
            )
            .intersection(area);

            for row in bounds.top()..bounds.bottom() {
                for col in bounds.left()..bounds.right() {
                    let (x, y) = cell_center_px(col, row);
                    let d2 = ((x - cx).powi(2) + (y - cy).powi(2)) / (radius * radius);
                    if d2 >= 1.0 {
                        continue;
                    }
                    // Soft edge, strongest in the middle.
                    let alpha = spec.opacity * (1.0 - d2);
                    if let Some(cell) = buf.cell_mut(Position::new(col, row)) {
                        let under = match cell.bg {
                            Color::Rgb(r, g, b) => [r, g, b],
                            _ => Theme::PAGE_BG,
                        };
                        cell.set_bg(rgb(blend(colour, under, alpha)));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::core::orbs::OrbSpec;

    fn orb_doc(spec: OrbSpec) -> (Document, NodeId) {
        let mut doc = Document::new();
        let orbs = doc.create_element(ElementKind::Container);
        let root = doc.root();
        doc.append_child(root, orbs);
        let orb = doc.create_element(ElementKind::Orb(spec));
        doc.append_child(orbs, orb);
        (doc, orbs)
    }

    #[test]
    fn test_orb_tints_its_centre_only() {
        let spec = OrbSpec {
            size_px: 160.0,
            left_pct: 0.0,
            top_pct: 0.0,
            opacity: 0.3,
            duration: Duration::from_secs(20),
            drift_px: 0.0,
        };
        let (doc, orbs) = orb_doc(spec);
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Theme::page_style());
        OrbField { doc: &doc, orbs, now: Instant::now() }.render(area, &mut buf);

        // Centre of the orb is at (80, 80) px: cell (10, 5).
        assert_ne!(buf[(10, 5)].bg, rgb(Theme::PAGE_BG));
        assert_eq!(buf[(50, 15)].bg, rgb(Theme::PAGE_BG));
    }
}
