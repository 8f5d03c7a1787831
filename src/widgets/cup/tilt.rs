//! Drag velocity to tilt.
//!
//! A held cup lags behind the hand: moving right swings it left. The raw
//! tilt is a linear mix of horizontal velocity and acceleration, clamped,
//! then smoothed by a spring so every consumer sees a continuous signal.

use crate::animation::Spring;
use crate::config::TiltConfig;
use crate::schedule::Millis;

/// Unsmoothed tilt in degrees for a velocity (px/s) and acceleration
/// ((px/s)/ms) sample. Rightward motion gives negative tilt.
pub fn raw_tilt(config: &TiltConfig, velocity_x: f32, acceleration_x: f32) -> f32 {
    let velocity_x = finite_or_zero(velocity_x);
    let acceleration_x = finite_or_zero(acceleration_x);
    let tilt = -config.velocity_gain * velocity_x - config.acceleration_gain * acceleration_x;
    finite_or_zero(tilt).clamp(-config.max_tilt, config.max_tilt)
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Values derived from the smoothed tilt, shared by renderer and spill logic
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltReadout {
    /// Smoothed tilt, degrees
    pub tilt: f32,
    /// Rotation of the cup body, degrees (clockwise)
    pub cup_rotation: f32,
    /// Liquid surface angle relative to the cup, degrees. Opposes the cup
    /// rotation so the surface stays close to level.
    pub surface_angle: f32,
    /// Horizontal slosh of the liquid towards the low side, px
    pub slosh: f32,
}

impl TiltReadout {
    pub fn derive(tilt: f32, config: &TiltConfig) -> Self {
        let tilt = finite_or_zero(tilt).clamp(-config.max_tilt, config.max_tilt);
        let fraction = if config.max_tilt > 0.0 {
            tilt / config.max_tilt
        } else {
            0.0
        };
        Self {
            tilt,
            cup_rotation: tilt,
            surface_angle: (-tilt).clamp(-config.max_surface_angle, config.max_surface_angle),
            slosh: fraction * config.max_slosh,
        }
    }
}

/// Turns drag samples into a smoothed tilt signal.
#[derive(Debug, Clone)]
pub struct TiltEngine {
    config: TiltConfig,
    spring: Spring,
    raw: f32,
    last_velocity_x: f32,
    last_sample_at: Option<Millis>,
    clock: Millis,
}

impl TiltEngine {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            spring: Spring::new(config.spring),
            config,
            raw: 0.0,
            last_velocity_x: 0.0,
            last_sample_at: None,
            clock: 0,
        }
    }

    /// Start a drag at `now` with the pointer at rest
    pub fn begin(&mut self, now: Millis) {
        self.advance_to(now);
        self.last_velocity_x = 0.0;
        self.last_sample_at = Some(now);
        self.set_raw(0.0);
    }

    /// Feed one drag sample. Samples with a non-positive interval are
    /// ignored. Returns the new raw tilt.
    pub fn sample(&mut self, velocity_x: f32, delta_ms: f32, now: Millis) -> f32 {
        self.advance_to(now);
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            return self.raw;
        }

        let velocity_x = finite_or_zero(velocity_x);
        let acceleration = (velocity_x - self.last_velocity_x) / delta_ms;
        self.last_velocity_x = velocity_x;
        self.last_sample_at = Some(now);

        let tilt = raw_tilt(&self.config, velocity_x, acceleration);
        self.set_raw(tilt);
        tilt
    }

    /// End of drag: the target returns to upright
    pub fn release(&mut self, now: Millis) {
        self.advance_to(now);
        self.last_velocity_x = 0.0;
        self.last_sample_at = None;
        self.set_raw(0.0);
    }

    /// Step the smoothing spring up to `now`
    pub fn advance_to(&mut self, now: Millis) {
        if now <= self.clock {
            return;
        }

        // A pointer that stopped sending samples is resting: its velocity
        // is zero from the idle deadline on.
        if let Some(last) = self.last_sample_at {
            let idle_at = last + self.config.idle_after_ms;
            if idle_at <= now && self.raw != 0.0 {
                if idle_at > self.clock {
                    self.step(idle_at);
                }
                self.last_velocity_x = 0.0;
                self.set_raw(0.0);
            }
        }

        self.step(now);
    }

    fn step(&mut self, until: Millis) {
        let dt = until.saturating_sub(self.clock) as f32 / 1000.0;
        self.clock = self.clock.max(until);
        self.spring.step(dt);

        let max = self.config.max_tilt;
        if self.spring.position > max {
            self.spring.position = max;
            self.spring.velocity = self.spring.velocity.min(0.0);
        } else if self.spring.position < -max {
            self.spring.position = -max;
            self.spring.velocity = self.spring.velocity.max(0.0);
        }
    }

    fn set_raw(&mut self, tilt: f32) {
        self.raw = tilt;
        self.spring.set_target(tilt);
    }

    /// Latest unsmoothed tilt
    pub fn raw(&self) -> f32 {
        self.raw
    }

    /// Smoothed tilt, degrees, always within the configured clamp
    pub fn tilt(&self) -> f32 {
        self.spring
            .position
            .clamp(-self.config.max_tilt, self.config.max_tilt)
    }

    pub fn readout(&self) -> TiltReadout {
        TiltReadout::derive(self.tilt(), &self.config)
    }

    pub fn is_settled(&self) -> bool {
        self.spring.is_settled(0.01)
    }

    /// Upright and at rest
    pub fn reset(&mut self, now: Millis) {
        self.clock = self.clock.max(now);
        self.raw = 0.0;
        self.last_velocity_x = 0.0;
        self.last_sample_at = None;
        self.spring.snap_to(0.0);
    }
}
