//! Pouring and depletion.

use crate::config::PourConfig;

/// Remaining coffee as a percentage, always within [0, 100]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct CoffeeLevel(f32);

impl CoffeeLevel {
    pub const FULL: CoffeeLevel = CoffeeLevel(100.0);
    pub const EMPTY: CoffeeLevel = CoffeeLevel(0.0);

    /// Clamps into [0, 100]; NaN counts as empty
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::EMPTY;
        }
        Self(value.clamp(0.0, 100.0))
    }

    pub fn get(&self) -> f32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 <= 0.0
    }

    /// Remove up to `amount`, returning how much was actually removed
    pub fn drain(&mut self, amount: f32) -> f32 {
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        let drained = amount.min(self.0);
        self.0 = (self.0 - drained).max(0.0);
        drained
    }
}

impl Default for CoffeeLevel {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PourState {
    Idle,
    Pouring,
}

/// Side of the cup that dips and spills
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Positive tilt turns the cup clockwise, lowering the right rim
    pub fn from_tilt(tilt: f32) -> Self {
        if tilt < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn sign(&self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// A state change the owner has to act on (start or stop the pour timer)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PourTransition {
    Started,
    Stopped,
}

/// Result of one pour tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PourTick {
    /// Level removed by this tick
    pub drained: f32,
    /// Side the drop leaves from
    pub side: Side,
}

#[derive(Debug, Clone)]
pub struct PourMachine {
    config: PourConfig,
    state: PourState,
}

impl PourMachine {
    pub fn new(config: PourConfig) -> Self {
        Self {
            config,
            state: PourState::Idle,
        }
    }

    pub fn state(&self) -> PourState {
        self.state
    }

    pub fn config(&self) -> &PourConfig {
        &self.config
    }

    /// Re-evaluate the state for the current inputs
    pub fn evaluate(
        &mut self,
        tilt: f32,
        dragging: bool,
        level: CoffeeLevel,
    ) -> Option<PourTransition> {
        let magnitude = tilt.abs();
        match self.state {
            PourState::Idle => {
                if dragging && !level.is_empty() && magnitude > self.config.threshold {
                    self.state = PourState::Pouring;
                    return Some(PourTransition::Started);
                }
            }
            PourState::Pouring => {
                let floor = self.config.threshold - self.config.hysteresis;
                if !dragging || level.is_empty() || magnitude.is_nan() || magnitude < floor {
                    self.state = PourState::Idle;
                    return Some(PourTransition::Stopped);
                }
            }
        }
        None
    }

    /// Force the idle state. Returns `Stopped` if it was pouring.
    pub fn stop(&mut self) -> Option<PourTransition> {
        match self.state {
            PourState::Pouring => {
                self.state = PourState::Idle;
                Some(PourTransition::Stopped)
            }
            PourState::Idle => None,
        }
    }

    /// Level lost per tick at `tilt`. Grows linearly with the tilt beyond
    /// the threshold, between the configured minimum and maximum.
    pub fn depletion_step(&self, tilt: f32) -> f32 {
        let excess = tilt.abs() - self.config.threshold;
        (excess * self.config.depletion_gain)
            .clamp(self.config.min_depletion, self.config.max_depletion)
    }

    /// One cadence tick: drain the level. Returns `None` when not pouring
    /// or already empty, in which case no drop may be emitted.
    pub fn tick(&mut self, tilt: f32, level: &mut CoffeeLevel) -> Option<PourTick> {
        if self.state != PourState::Pouring || level.is_empty() {
            return None;
        }
        let drained = level.drain(self.depletion_step(tilt));
        Some(PourTick {
            drained,
            side: Side::from_tilt(tilt),
        })
    }

    /// Number of drops in the release burst for `level`
    pub fn burst_count(&self, level: CoffeeLevel) -> u32 {
        if level.is_empty() || self.config.burst_divisor <= 0.0 {
            return 0;
        }
        (level.get() / self.config.burst_divisor).floor() as u32
    }
}
