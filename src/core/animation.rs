//! Declarative keyframe animations and their sampling.
//!
//! The page only *starts* animations (pulse, orb drift).  The host samples
//! them against the wall clock every frame, the way a browser's animation
//! engine runs independently of the script that started it.

use std::time::Duration;

// ───────────────────────────────────────── transform ─────────

/// 2-D transform: translation in px, uniform scale and z-rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub rotate_deg: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate_deg: 0.0,
    };

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, deg: f64) -> Self {
        self.rotate_deg = deg;
        self
    }

    /// Component-wise interpolation.
    pub fn lerp(a: Transform, b: Transform, t: f64) -> Transform {
        Transform {
            translate_x: lerp(a.translate_x, b.translate_x, t),
            translate_y: lerp(a.translate_y, b.translate_y, t),
            scale: lerp(a.scale, b.scale, t),
            rotate_deg: lerp(a.rotate_deg, b.rotate_deg, t),
        }
    }

    /// CSS `transform` value, e.g.
    /// `translate3d(4px, -2px, 0) rotate3d(0,0,1,1deg) scale(1)`.
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) rotate3d(0,0,1,{}deg) scale({})",
            self.translate_x, self.translate_y, self.rotate_deg, self.scale
        )
    }
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

// ───────────────────────────────────────── timing ────────────

/// Iteration-level timing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic ease-out: `1 - (1-t)³`.
    EaseOut,
    /// Cubic ease-in-out.
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    Finite(u32),
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayDirection {
    #[default]
    Normal,
    /// Odd iterations play backwards.
    Alternate,
}

// ───────────────────────────────────────── animation ─────────

/// Evenly spaced transform keyframes played over `duration` per iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub keyframes: Vec<Transform>,
    pub duration: Duration,
    pub easing: Easing,
    pub iterations: Iterations,
    pub direction: PlayDirection,
}

impl Animation {
    /// Single forward pass.
    pub fn once(keyframes: Vec<Transform>, duration: Duration, easing: Easing) -> Self {
        Self {
            keyframes,
            duration,
            easing,
            iterations: Iterations::Finite(1),
            direction: PlayDirection::Normal,
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        match self.iterations {
            Iterations::Infinite => false,
            Iterations::Finite(n) => {
                self.duration.is_zero() || elapsed >= self.duration.saturating_mul(n)
            }
        }
    }

    /// Transform at `elapsed` since start, or `None` once the animation has
    /// finished (no fill: the element falls back to its own transform).
    pub fn sample(&self, elapsed: Duration) -> Option<Transform> {
        if self.keyframes.is_empty() || self.is_finished(elapsed) {
            return None;
        }
        if self.keyframes.len() == 1 {
            return Some(self.keyframes[0]);
        }

        let cycles = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let iteration = cycles.floor() as u64;
        let mut progress = cycles - cycles.floor();
        if self.direction == PlayDirection::Alternate && iteration % 2 == 1 {
            progress = 1.0 - progress;
        }

        let eased = self.easing.apply(progress);
        let segments = (self.keyframes.len() - 1) as f64;
        let position = eased * segments;
        let index = (position.floor() as usize).min(self.keyframes.len() - 2);
        let local = position - index as f64;

        Some(Transform::lerp(
            self.keyframes[index],
            self.keyframes[index + 1],
            local,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_easing_boundaries() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert!(approx(easing.apply(0.0), 0.0), "{easing:?} at t=0");
            assert!(approx(easing.apply(1.0), 1.0), "{easing:?} at t=1");
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = easing.apply(i as f64 / 20.0);
                assert!(v >= prev, "{easing:?} not monotonic at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_single_pass_finishes() {
        let pulse = Animation::once(
            vec![
                Transform::IDENTITY.with_scale(0.98),
                Transform::IDENTITY,
            ],
            Duration::from_millis(320),
            Easing::Linear,
        );
        let start = pulse.sample(Duration::ZERO).unwrap();
        assert!(approx(start.scale, 0.98));
        let mid = pulse.sample(Duration::from_millis(160)).unwrap();
        assert!(approx(mid.scale, 0.99));
        assert!(pulse.sample(Duration::from_millis(320)).is_none());
        assert!(pulse.is_finished(Duration::from_secs(1)));
    }

    #[test]
    fn test_three_keyframes_peak_in_the_middle() {
        let drift = Animation::once(
            vec![
                Transform::IDENTITY,
                Transform::translate(0.0, 10.0),
                Transform::IDENTITY,
            ],
            Duration::from_secs(2),
            Easing::Linear,
        );
        let peak = drift.sample(Duration::from_secs(1)).unwrap();
        assert!(approx(peak.translate_y, 10.0));
        let quarter = drift.sample(Duration::from_millis(500)).unwrap();
        assert!(approx(quarter.translate_y, 5.0));
    }

    #[test]
    fn test_alternate_plays_odd_iterations_backwards() {
        let anim = Animation {
            keyframes: vec![Transform::IDENTITY, Transform::translate(0.0, 8.0)],
            duration: Duration::from_secs(1),
            easing: Easing::Linear,
            iterations: Iterations::Infinite,
            direction: PlayDirection::Alternate,
        };
        let forward = anim.sample(Duration::from_millis(250)).unwrap();
        let backward = anim.sample(Duration::from_millis(1250)).unwrap();
        assert!(approx(forward.translate_y, 2.0));
        assert!(approx(backward.translate_y, 6.0));
        assert!(!anim.is_finished(Duration::from_secs(3600)));
    }

    #[test]
    fn test_transform_css() {
        let t = Transform::translate(4.0, -2.0).with_rotation(1.0);
        assert_eq!(
            t.to_css(),
            "translate3d(4px, -2px, 0) rotate3d(0,0,1,1deg) scale(1)"
        );
    }
}
