use super::{Animatable, Transition};
use crate::schedule::Millis;

/// Result of advancing a tween
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// Time-based interpolation between two values.
///
/// Unlike a spring, a tween has a fixed duration, so completion can be
/// scheduled as a timer. Time is passed in explicitly.
#[derive(Debug, Clone)]
pub struct Tween<T: Animatable> {
    start: T,
    target: T,
    current: T,
    started_at: Millis,
    transition: Transition,
    running: bool,
}

impl<T: Animatable> Tween<T> {
    /// A settled tween holding `value`
    pub fn new(value: T) -> Self {
        Self {
            start: value.clone(),
            target: value.clone(),
            current: value,
            started_at: 0,
            transition: Transition::default(),
            running: false,
        }
    }

    /// Start animating from the current value to `target`
    pub fn animate_to(&mut self, target: T, now: Millis, transition: Transition) {
        self.start = self.current.clone();
        self.target = target;
        self.started_at = now;
        self.transition = transition;
        self.running = true;
    }

    /// Recompute the value at `now`
    pub fn advance(&mut self, now: Millis) -> AdvanceResult<T> {
        if !self.running {
            return AdvanceResult::NoChange;
        }

        let elapsed = now.saturating_sub(self.started_at);
        if elapsed < self.transition.delay_ms {
            return AdvanceResult::NoChange;
        }
        let active = elapsed - self.transition.delay_ms;

        let new_value = if active >= self.transition.duration_ms {
            self.running = false;
            self.target.clone()
        } else {
            let t = active as f32 / self.transition.duration_ms as f32;
            T::lerp(&self.start, &self.target, self.transition.easing.evaluate(t))
        };

        if new_value == self.current {
            AdvanceResult::NoChange
        } else {
            self.current = new_value.clone();
            AdvanceResult::Changed(new_value)
        }
    }

    pub fn is_animating(&self) -> bool {
        self.running
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.start = value.clone();
        self.target = value.clone();
        self.current = value;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    #[test]
    fn test_linear_tween_midpoint_and_end() {
        let mut tween = Tween::new(0.0f32);
        tween.animate_to(10.0, 100, Transition::new(200, Easing::Linear));

        assert_eq!(tween.advance(200), AdvanceResult::Changed(5.0));
        assert!(tween.is_animating());
        assert_eq!(tween.advance(300), AdvanceResult::Changed(10.0));
        assert!(!tween.is_animating());
        assert_eq!(tween.advance(400), AdvanceResult::NoChange);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut tween = Tween::new(1.0f32);
        tween.animate_to(2.0, 0, Transition::new(100, Easing::Linear).delay(50));
        assert_eq!(tween.advance(40), AdvanceResult::NoChange);
        assert_eq!(*tween.current(), 1.0);
        assert_eq!(tween.advance(150), AdvanceResult::Changed(2.0));
        assert!(!tween.is_animating());
    }

    #[test]
    fn test_retarget_starts_from_current() {
        let mut tween = Tween::new(0.0f32);
        tween.animate_to(100.0, 0, Transition::new(100, Easing::Linear));
        tween.advance(50);
        tween.animate_to(0.0, 50, Transition::new(100, Easing::Linear));
        tween.advance(100);
        assert_eq!(*tween.current(), 25.0);
    }
}
