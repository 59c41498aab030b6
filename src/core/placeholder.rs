//! Generated stand-in graphic for logos whose image failed to load.
//!
//! A rounded square with a diagonal two-colour gradient and a centred glyph.
//! The only input is the item index, which names the gradient definition so
//! that placeholders sharing a document never collide on ids.

use image::{Rgba, RgbaImage};

/// Edge length of the square, in px.
pub const PLACEHOLDER_SIZE: u32 = 72;
/// Corner radius, in px.
pub const PLACEHOLDER_RADIUS: u32 = 12;
/// Gradient start (top-left) colour.
pub const GRADIENT_FROM: [u8; 3] = [0x22, 0xd3, 0xee];
/// Gradient end (bottom-right) colour.
pub const GRADIENT_TO: [u8; 3] = [0x7c, 0x3a, 0xed];
/// Glyph drawn in the middle of every placeholder.
pub const PLACEHOLDER_GLYPH: char = '7';

/// Placeholder graphic for item `index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderGraphic {
    index: usize,
}

/// Build the placeholder for item `index`.  Pure: same index, same graphic.
pub fn placeholder_graphic(index: usize) -> PlaceholderGraphic {
    PlaceholderGraphic { index }
}

impl PlaceholderGraphic {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Identifier of the gradient definition inside the graphic.
    pub fn gradient_id(&self) -> String {
        format!("g{}", self.index)
    }

    pub fn glyph(&self) -> char {
        PLACEHOLDER_GLYPH
    }

    /// Standalone SVG markup.
    pub fn to_svg(&self) -> String {
        let id = self.gradient_id();
        let size = PLACEHOLDER_SIZE;
        let half = size / 2;
        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n",
                "  <defs>\n",
                "    <linearGradient id=\"{id}\" x1=\"0\" x2=\"1\" y1=\"0\" y2=\"1\">\n",
                "      <stop offset=\"0\" stop-color=\"{from}\"/>\n",
                "      <stop offset=\"1\" stop-color=\"{to}\"/>\n",
                "    </linearGradient>\n",
                "  </defs>\n",
                "  <rect x=\"0\" y=\"0\" width=\"{size}\" height=\"{size}\" rx=\"{radius}\" fill=\"url(#{id})\"/>\n",
                "  <text x=\"{half}\" y=\"{baseline}\" text-anchor=\"middle\" fill=\"white\" font-size=\"26\" font-family=\"Inter, sans-serif\">{glyph}</text>\n",
                "</svg>\n",
            ),
            size = size,
            id = id,
            from = hex(GRADIENT_FROM),
            to = hex(GRADIENT_TO),
            radius = PLACEHOLDER_RADIUS,
            half = half,
            baseline = half + 7,
            glyph = self.glyph(),
        )
    }

    /// Rasterise the rounded gradient square (without the glyph, which the
    /// terminal draws as text).  Pixels outside the rounded corners are fully
    /// transparent.
    pub fn rasterize(&self) -> RgbaImage {
        let size = PLACEHOLDER_SIZE;
        let span = (2 * (size - 1)) as f64;
        RgbaImage::from_fn(size, size, |x, y| {
            if !inside_rounded_square(x, y, size, PLACEHOLDER_RADIUS) {
                return Rgba([0, 0, 0, 0]);
            }
            let t = (x + y) as f64 / span;
            let [r, g, b] = gradient_at(t);
            Rgba([r, g, b, 255])
        })
    }
}

/// Colour of the diagonal gradient at `t ∈ [0, 1]`.
pub fn gradient_at(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let from = GRADIENT_FROM[i] as f64;
        let to = GRADIENT_TO[i] as f64;
        *channel = (from + (to - from) * t).round() as u8;
    }
    out
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Pixel-centre coverage test for a square with rounded corners.
fn inside_rounded_square(x: u32, y: u32, size: u32, radius: u32) -> bool {
    let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
    let r = radius as f64;
    let far = size as f64 - r;
    let cx = if px < r {
        r
    } else if px > far {
        far
    } else {
        return true;
    };
    let cy = if py < r {
        r
    } else if py > far {
        far
    } else {
        return true;
    };
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_id_is_index_keyed() {
        assert_eq!(placeholder_graphic(0).gradient_id(), "g0");
        assert_eq!(placeholder_graphic(41).gradient_id(), "g41");
        assert_eq!(placeholder_graphic(3), placeholder_graphic(3));
        assert_ne!(placeholder_graphic(3), placeholder_graphic(4));
    }

    #[test]
    fn test_svg_references_its_own_gradient() {
        let svg = placeholder_graphic(5).to_svg();
        assert!(svg.contains("linearGradient id=\"g5\""));
        assert!(svg.contains("fill=\"url(#g5)\""));
        assert!(svg.contains("stop-color=\"#22d3ee\""));
        assert!(svg.contains("stop-color=\"#7c3aed\""));
        assert!(svg.contains("rx=\"12\""));
        assert!(svg.contains(">7</text>"));
    }

    #[test]
    fn test_raster_corners_are_transparent() {
        let img = placeholder_graphic(0).rasterize();
        assert_eq!(img.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(PLACEHOLDER_SIZE - 1, PLACEHOLDER_SIZE - 1)[3], 0);
        assert_eq!(img.get_pixel(36, 0)[3], 255);
        assert_eq!(img.get_pixel(36, 36)[3], 255);
    }

    #[test]
    fn test_raster_gradient_runs_diagonally() {
        let img = placeholder_graphic(0).rasterize();
        let near_start = img.get_pixel(12, 12);
        let near_end = img.get_pixel(59, 59);
        // Red rises from 0x22 towards 0x7c, green falls from 0xd3 towards 0x3a.
        assert!(near_start[0] < near_end[0]);
        assert!(near_start[1] > near_end[1]);
        assert_eq!(gradient_at(0.0), GRADIENT_FROM);
        assert_eq!(gradient_at(1.0), GRADIENT_TO);
    }
}
