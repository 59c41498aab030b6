//! Floating background orbs: random once, then left to their animation.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;

use super::animation::{Animation, Easing, Iterations, PlayDirection, Transform};
use super::view::{ElementKind, NodeId, View};

pub const ORB_CLASS: &str = "orb";
pub const DEFAULT_ORB_COUNT: usize = 7;

const SIZE_PX: Range<f64> = 80.0..320.0;
const OPACITY: Range<f64> = 0.12..0.34;
const DURATION_S: Range<f64> = 12.0..36.0;
const DRIFT_PX: Range<f64> = -15.0..15.0;
/// Scale at the middle keyframe of the drift.
const DRIFT_SCALE: f64 = 1.05;

/// Randomly drawn parameters of one orb.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbSpec {
    /// Diameter in px.
    pub size_px: f64,
    /// Position of the top-left corner as a whole percentage of the page.
    pub left_pct: f64,
    pub top_pct: f64,
    pub opacity: f64,
    /// Length of one drift iteration.
    pub duration: Duration,
    /// Vertical travel at the peak of the drift, in px.
    pub drift_px: f64,
}

impl OrbSpec {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            size_px: rng.random_range(SIZE_PX),
            left_pct: rng.random_range(0.0..=100.0_f64).round(),
            top_pct: rng.random_range(0.0..=100.0_f64).round(),
            opacity: rng.random_range(OPACITY),
            duration: Duration::from_secs_f64(rng.random_range(DURATION_S)),
            drift_px: rng.random_range(DRIFT_PX),
        }
    }

    /// Infinite, alternating up-and-back drift.
    pub fn drift_animation(&self) -> Animation {
        Animation {
            keyframes: vec![
                Transform::IDENTITY,
                Transform::translate(0.0, self.drift_px).with_scale(DRIFT_SCALE),
                Transform::IDENTITY,
            ],
            duration: self.duration,
            easing: Easing::EaseInOut,
            iterations: Iterations::Infinite,
            direction: PlayDirection::Alternate,
        }
    }
}

/// Append `count` orbs to `root` and start their drift.  Returns the new
/// elements in creation order.
pub fn make_orbs<V: View, R: Rng + ?Sized>(
    view: &mut V,
    root: NodeId,
    count: usize,
    rng: &mut R,
) -> Vec<NodeId> {
    let mut created = Vec::with_capacity(count);
    for _ in 0..count {
        let spec = OrbSpec::random(rng);
        let animation = spec.drift_animation();
        let orb = view.create_element(ElementKind::Orb(spec));
        view.add_class(orb, ORB_CLASS);
        view.animate(orb, animation);
        view.append_child(root, orb);
        created.push(orb);
    }
    tracing::debug!(count, "orbs created");
    created
}
