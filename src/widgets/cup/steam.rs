//! Steam rising from the rim, pushed around by cup motion.

use rand::Rng;

use crate::config::SteamConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct SteamParticle {
    /// Offset from the rim centre, px (y grows downwards, steam rises negative)
    pub x: f32,
    pub y: f32,
    /// Upward drift per frame
    pub rise: f32,
    /// Frames left
    pub life: f32,
    pub max_life: f32,
}

impl SteamParticle {
    /// 1 when freshly spawned, 0 when about to respawn
    pub fn remaining(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// A fixed pool of recycled steam particles
#[derive(Debug, Clone)]
pub struct SteamField {
    config: SteamConfig,
    particles: Vec<SteamParticle>,
    visible: bool,
}

impl SteamField {
    pub fn new<R: Rng>(config: SteamConfig, rng: &mut R) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.particles),
            config,
            visible: true,
        };
        field.respawn_all(rng);
        field
    }

    fn spawn<R: Rng>(config: &SteamConfig, rng: &mut R, staggered: bool) -> SteamParticle {
        let (lo, hi) = config.life_range;
        let max_life = lo + rng.gen::<f32>() * (hi - lo).max(0.0);
        let (rise_lo, rise_hi) = config.rise_range;
        SteamParticle {
            x: (rng.gen::<f32>() - 0.5) * 2.0 * config.spread,
            y: if staggered { -rng.gen::<f32>() * 20.0 } else { 0.0 },
            rise: rise_lo + rng.gen::<f32>() * (rise_hi - rise_lo).max(0.0),
            // Start at a random age so the plume does not pulse
            life: if staggered {
                rng.gen::<f32>() * max_life
            } else {
                max_life
            },
            max_life,
        }
    }

    fn respawn_all<R: Rng>(&mut self, rng: &mut R) {
        self.particles.clear();
        for _ in 0..self.config.particles {
            self.particles.push(Self::spawn(&self.config, rng, true));
        }
    }

    /// Advance one frame. `displacement` is how far the cup moved this frame;
    /// steam lags behind it.
    pub fn update<R: Rng>(&mut self, displacement: (f32, f32), rng: &mut R) {
        if !self.visible {
            return;
        }
        let wind = self.config.wind;
        for particle in &mut self.particles {
            particle.life -= 1.0;
            particle.y -= particle.rise;
            particle.x -= displacement.0 * wind;
            particle.y -= displacement.1 * wind;

            if particle.life <= 0.0 {
                *particle = Self::spawn(&self.config, rng, false);
            }
        }
    }

    pub fn particles(&self) -> &[SteamParticle] {
        &self.particles
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.particles.is_empty()
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Fresh plume
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.visible = true;
        self.respawn_all(rng);
    }
}
