use super::Transform;

/// Types that can be interpolated by a tween
pub trait Animatable: Clone + PartialEq {
    /// Linear interpolation between two values.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Transform {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Transform {
            translate: (
                f32::lerp(&from.translate.0, &to.translate.0, t),
                f32::lerp(&from.translate.1, &to.translate.1, t),
            ),
            rotate: f32::lerp(&from.rotate, &to.rotate, t),
        }
    }
}
