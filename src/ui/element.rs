//! Drawing of leaf page elements: logos and placeholder graphics.

use std::collections::HashMap;

use image::RgbaImage;
use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};

use crate::core::document::Document;
use crate::core::logos::LogoReference;
use crate::core::view::{ElementKind, LoadState, NodeId, View};
use crate::ui::halfblocks::{overlay_glyph, render_image};
use crate::ui::layout::scale_about_center;
use crate::ui::theme::Theme;

/// Largest upscale applied to a decoded logo.
const MAX_UPSCALE: f64 = 4.0;

/// Decoded pixels the renderer draws from.
#[derive(Clone, Copy)]
pub struct Assets<'a> {
    pub logos: &'a HashMap<LogoReference, RgbaImage>,
    pub placeholder: &'a RgbaImage,
}

/// Draw the image or placeholder element `node` into `area`.  Other kinds
/// draw nothing.
pub fn render_element(doc: &Document, node: NodeId, area: Rect, assets: Assets<'_>, buf: &mut Buffer) {
    match doc.kind(node) {
        ElementKind::Image(img) => match img.load {
            LoadState::Loaded { .. } => {
                let Some(pixels) = assets.logos.get(&img.src) else {
                    return;
                };
                let area = match relative_size(doc, node) {
                    Some(fraction) => scale_about_center(area, fraction),
                    None => area,
                };
                render_image(pixels, area, MAX_UPSCALE, buf);
            }
            LoadState::Pending => {
                if area.width == 0 || area.height == 0 {
                    return;
                }
                let centre = Rect::new(area.x + area.width / 2, area.y + area.height / 2, 1, 1);
                Span::styled("…", Theme::pending_style()).render(centre, buf);
            }
            // Replaced by a placeholder as soon as the failure is dispatched.
            LoadState::Failed => {}
        },
        ElementKind::Placeholder(graphic) => {
            let covered = render_image(assets.placeholder, area, f64::INFINITY, buf);
            overlay_glyph(graphic.glyph(), covered, Theme::glyph_style(), buf);
        }
        ElementKind::Container | ElementKind::Orb(_) | ElementKind::Button { .. } => {}
    }
}

/// `width: NN%` on an element, as a fraction.
fn relative_size(doc: &Document, node: NodeId) -> Option<f64> {
    let pct: f64 = doc.style(node, "width")?.strip_suffix('%')?.trim().parse().ok()?;
    Some((pct / 100.0).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::placeholder::placeholder_graphic;
    use crate::core::view::ImageElement;
    use image::Rgba;

    #[test]
    fn test_placeholder_draws_glyph() {
        let mut doc = Document::new();
        let node = doc.create_element(ElementKind::Placeholder(placeholder_graphic(0)));
        let placeholder = placeholder_graphic(0).rasterize();
        let logos = HashMap::new();
        let assets = Assets { logos: &logos, placeholder: &placeholder };

        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        render_element(&doc, node, area, assets, &mut buf);
        let glyphs = buf.content().iter().filter(|c| c.symbol() == "7").count();
        assert_eq!(glyphs, 1);
    }

    #[test]
    fn test_pending_image_shows_ellipsis() {
        let mut doc = Document::new();
        let node = doc.create_element(ElementKind::Image(ImageElement::new("a.png".into(), "Logo 1")));
        let placeholder = RgbaImage::new(1, 1);
        let logos = HashMap::new();
        let assets = Assets { logos: &logos, placeholder: &placeholder };

        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        render_element(&doc, node, area, assets, &mut buf);
        assert_eq!(buf[(3, 1)].symbol(), "…");
    }

    #[test]
    fn test_loaded_image_respects_relative_width() {
        let mut doc = Document::new();
        let node = doc.create_element(ElementKind::Image(ImageElement::new("a.png".into(), "Logo 1")));
        doc.set_load_state(node, LoadState::Loaded { width: 10, height: 10 });
        doc.set_style(node, "width", "50%".to_string());
        assert_eq!(relative_size(&doc, node), Some(0.5));

        let mut logos = HashMap::new();
        logos.insert(LogoReference::from("a.png"), RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255])));
        let placeholder = RgbaImage::new(1, 1);
        let assets = Assets { logos: &logos, placeholder: &placeholder };

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        render_element(&doc, node, area, assets, &mut buf);
        // Half the area is 10×5 cells, which fits a 10×10 px image exactly.
        let painted = buf.content().iter().filter(|c| c.symbol() == "▀").count();
        assert_eq!(painted, 50);
    }
}
