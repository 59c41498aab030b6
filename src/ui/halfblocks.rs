//! Draw RGBA images into a buffer with half-block characters.
//!
//! Each cell shows two vertically stacked pixels: `▀` with the top pixel as
//! foreground and the bottom pixel as background.  Transparent pixels leave
//! the existing cell background alone, so rounded corners and logos with
//! alpha sit on whatever was drawn underneath.

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
};

/// Pixels at or below this alpha count as transparent.
const ALPHA_CUTOFF: u8 = 24;

/// Scale `img` to fit `area` (preserving aspect ratio, never upscaling past
/// `max_scale`) and draw it centred.  Returns the cells actually covered.
pub fn render_image(img: &RgbaImage, area: Rect, max_scale: f64, buf: &mut Buffer) -> Rect {
    if area.width == 0 || area.height == 0 || img.width() == 0 || img.height() == 0 {
        return Rect::default();
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;

    let src_w = img.width() as f64;
    let src_h = img.height() as f64;

    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(max_scale);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = if (fit_w, fit_h) == img.dimensions() {
        img.clone()
    } else {
        image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle)
    };
    let (iw, ih) = (rgba.width(), rgba.height());

    let cols = (iw as u16).min(area.width);
    let rows = (ih.div_ceil(2) as u16).min(area.height);
    let col_offset = (area.width - cols) / 2;
    let row_offset = (area.height - rows) / 2;

    for row in 0..rows {
        let yt = (row as u32) * 2;
        let yb = yt + 1;
        for col in 0..cols {
            let top = opaque(rgba.get_pixel(col as u32, yt).0);
            let bottom = if yb < ih {
                opaque(rgba.get_pixel(col as u32, yb).0)
            } else {
                None
            };
            let pos = Position::new(area.x + col_offset + col, area.y + row_offset + row);
            let Some(cell) = buf.cell_mut(pos) else {
                continue;
            };
            match (top, bottom) {
                (Some(t), Some(b)) => {
                    cell.set_char('▀').set_fg(t).set_bg(b);
                }
                (Some(t), None) => {
                    cell.set_char('▀').set_fg(t);
                }
                (None, Some(b)) => {
                    cell.set_char('▄').set_fg(b);
                }
                (None, None) => {}
            }
        }
    }

    Rect::new(area.x + col_offset, area.y + row_offset, cols, rows)
}

/// Write `glyph` in the centre cell of `area`, keeping the cell background.
pub fn overlay_glyph(glyph: char, area: Rect, style: Style, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let pos = Position::new(area.x + area.width / 2, area.y + area.height / 2);
    if let Some(cell) = buf.cell_mut(pos) {
        // The glyph replaces the half block, so the bottom pixel colour has
        // to become the background of the whole cell.
        if cell.symbol() == "▄" {
            let fg = cell.fg;
            cell.set_bg(fg);
        }
        cell.set_char(glyph);
        if let Some(fg) = style.fg {
            cell.set_fg(fg);
        }
        cell.modifier.insert(style.add_modifier);
    }
}

fn opaque([r, g, b, a]: [u8; 4]) -> Option<Color> {
    (a > ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
}
