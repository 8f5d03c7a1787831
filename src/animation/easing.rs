//! Easing curves for time-based tweens.
//!
//! An easing maps normalized time `t` in `[0, 1]` to an interpolation factor.
//! The cup uses [`Easing::Standard`] to dock, [`Easing::EaseIn`] to fall, and
//! spill drops use the same ease-in curve to approximate gravity.

/// Easing curve for a tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Material-style standard curve, `cubic-bezier(0.4, 0, 0.2, 1)`
    Standard,
}

impl Easing {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => ease_in(t),
            Easing::Standard => cubic_bezier(t, 0.4, 0.0, 0.2, 1.0),
        }
    }
}

pub(crate) fn ease_in(t: f32) -> f32 {
    t * t
}

/// Solve the bezier for the parameter whose x is `t`, then return its y.
/// Assumes x1 and x2 lie in [0, 1].
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut u = t;
    for _ in 0..8 {
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= (bezier_coord(u, x1, x2) - t) / slope;
    }
    bezier_coord(u.clamp(0.0, 1.0), y1, y2)
}

fn bezier_coord(u: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - u;
    3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}
