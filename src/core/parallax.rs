//! Mouse parallax for the hero node.

use super::animation::Transform;
use super::view::PxRect;

/// Translation per unit of pointer offset (offset is a fraction of the
/// hero's size, so a pointer one hero-width away shifts it by this much).
pub const SHIFT_PX: f64 = 8.0;
/// Z-rotation per unit of horizontal pointer offset.
pub const TILT_DEG: f64 = 2.0;

/// Transform for a pointer at `(x, y)` relative to the hero laid out at
/// `hero`.  `None` when the hero has no area to measure against.
pub fn parallax_transform(hero: PxRect, x: f64, y: f64) -> Option<Transform> {
    if hero.is_empty() {
        return None;
    }
    let (cx, cy) = hero.center();
    let dx = (x - cx) / hero.width;
    let dy = (y - cy) / hero.height;
    Some(Transform::translate(dx * SHIFT_PX, dy * SHIFT_PX).with_rotation(dx * TILT_DEG))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_at_center_is_identity() {
        let hero = PxRect::new(100.0, 50.0, 200.0, 100.0);
        let t = parallax_transform(hero, 200.0, 100.0).unwrap();
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_offset_is_relative_to_size() {
        let hero = PxRect::new(0.0, 0.0, 200.0, 100.0);
        // Half a width right, half a height up.
        let t = parallax_transform(hero, 200.0, 0.0).unwrap();
        assert!((t.translate_x - 4.0).abs() < 1e-9);
        assert!((t.translate_y + 4.0).abs() < 1e-9);
        assert!((t.rotate_deg - 1.0).abs() < 1e-9);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn test_degenerate_hero() {
        assert!(parallax_transform(PxRect::default(), 10.0, 10.0).is_none());
    }
}
