mod animatable;
mod easing;
mod spring;
mod transform;
mod tween;

pub use animatable::Animatable;
pub(crate) use easing::ease_in;
pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use transform::Transform;
pub use tween::{AdvanceResult, Tween};

use crate::schedule::Millis;

/// How a tweened property moves to a new value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: Millis,
    /// Easing curve
    pub easing: Easing,
    /// Delay before the animation starts in milliseconds
    pub delay_ms: Millis,
}

impl Transition {
    pub fn new(duration_ms: Millis, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0,
        }
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: Millis) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Time from start until the animation is complete
    pub fn total_ms(&self) -> Millis {
        self.delay_ms + self.duration_ms
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(300, Easing::Standard)
    }
}
