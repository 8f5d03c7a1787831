/// Configuration for spring physics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

impl SpringConfig {
    /// Spring used to smooth the cup tilt: quick, with a little sway
    pub const TILT: Self = Self {
        mass: 0.5,
        stiffness: 150.0,
        damping: 12.0,
    };
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::TILT
    }
}

/// Largest integration step in seconds. Long frames are split into sub-steps
/// instead of being truncated, so the spring covers the full elapsed time.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// A damped spring chasing a target value that may move every step.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    /// Current position
    pub position: f32,
    /// Current velocity (units per second)
    pub velocity: f32,
    /// Value the spring is pulled towards
    pub target: f32,
    config: SpringConfig,
}

impl Spring {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            target: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = if target.is_finite() { target } else { 0.0 };
    }

    /// Advance the simulation by `dt_secs`, returning the new position.
    pub fn step(&mut self, dt_secs: f32) -> f32 {
        if !dt_secs.is_finite() || dt_secs <= 1e-6 {
            return self.position;
        }

        let mut remaining = dt_secs;
        while remaining > 1e-6 {
            let dt = remaining.min(MAX_SUBSTEP);
            remaining -= dt;

            // F = -k * x - c * v
            let displacement = self.position - self.target;
            let force =
                -self.config.stiffness * displacement - self.config.damping * self.velocity;
            let acceleration = force / self.config.mass;

            // Semi-implicit Euler
            self.velocity += acceleration * dt;
            self.position += self.velocity * dt;
        }

        self.position
    }

    /// Check if the spring has settled on its target
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - self.target).abs() < threshold && self.velocity.abs() < threshold
    }

    /// Jump to a value with no motion
    pub fn snap_to(&mut self, value: f32) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}
