//! Spill drops: emission, trajectories and the periodic sweep.

use std::collections::VecDeque;

use rand::Rng;

use super::pour::Side;
use crate::animation::ease_in;
use crate::config::DropConfig;
use crate::schedule::Millis;

/// Identifier of a spill drop. Never reused within one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DropId(u64);

impl DropId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A drop of spilled coffee. Immutable once emitted; where it is drawn is a
/// function of these fields and the time elapsed since `born_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpillDrop {
    pub id: DropId,
    /// Screen position at emission
    pub x: f32,
    pub y: f32,
    /// Diameter in px
    pub size: f32,
    /// px/s
    pub velocity_x: f32,
    /// px/s, positive is down
    pub velocity_y: f32,
    pub born_at: Millis,
}

/// Where and how a drop is drawn at some moment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropFrame {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl SpillDrop {
    pub fn age(&self, now: Millis) -> Millis {
        now.saturating_sub(self.born_at)
    }

    /// Ballistic frame at `now`: steady horizontal drift, an accelerating
    /// drop towards `floor_y`, and opacity and scale fading to zero over
    /// `duration_ms`.
    pub fn frame_at(&self, now: Millis, duration_ms: Millis, floor_y: f32) -> DropFrame {
        let duration_ms = duration_ms.max(1);
        let p = (self.age(now) as f32 / duration_ms as f32).clamp(0.0, 1.0);
        let seconds = duration_ms as f32 / 1000.0 * p;

        let fall = (floor_y - self.y).max(0.0);
        let y = self.y + self.velocity_y * seconds + fall * ease_in(p);

        DropFrame {
            x: self.x + self.velocity_x * seconds,
            y: y.min(floor_y.max(self.y)),
            opacity: 1.0 - p,
            scale: 1.0 - p,
        }
    }
}

/// Emission parameters before an id is assigned
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropSpawn {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl DropSpawn {
    /// Jittered spawn at `origin`, thrown towards `side`
    pub fn jittered<R: Rng>(
        rng: &mut R,
        origin: (f32, f32),
        side: Side,
        config: &DropConfig,
    ) -> Self {
        let jitter = config.position_jitter.abs();
        Self {
            x: origin.0 + sample(rng, (-jitter, jitter)),
            y: origin.1 + sample(rng, (-jitter, jitter)),
            size: sample(rng, config.size_range),
            velocity_x: side.sign() * sample(rng, config.speed_x_range),
            velocity_y: sample(rng, config.speed_y_range),
        }
    }
}

fn sample<R: Rng>(rng: &mut R, range: (f32, f32)) -> f32 {
    let (lo, hi) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    rng.gen_range(lo..=hi)
}

/// Live drops in emission order, bounded in length.
#[derive(Debug, Clone)]
pub struct DropField {
    drops: VecDeque<SpillDrop>,
    next_id: u64,
    max_drops: usize,
    lifetime_ms: Millis,
}

impl DropField {
    pub fn new(config: &DropConfig) -> Self {
        Self {
            drops: VecDeque::with_capacity(config.max_drops),
            next_id: 1,
            max_drops: config.max_drops.max(1),
            lifetime_ms: config.lifetime_ms,
        }
    }

    /// Add a drop born at `now`, evicting the oldest beyond the cap
    pub fn emit(&mut self, spawn: DropSpawn, now: Millis) -> DropId {
        let id = DropId(self.next_id);
        self.next_id += 1;

        while self.drops.len() >= self.max_drops {
            self.drops.pop_front();
        }
        self.drops.push_back(SpillDrop {
            id,
            x: spawn.x,
            y: spawn.y,
            size: spawn.size,
            velocity_x: spawn.velocity_x,
            velocity_y: spawn.velocity_y,
            born_at: now,
        });
        id
    }

    /// Remove drops older than the lifetime. Returns how many were removed.
    pub fn sweep(&mut self, now: Millis) -> usize {
        let before = self.drops.len();
        let lifetime = self.lifetime_ms;
        self.drops.retain(|drop| drop.age(now) <= lifetime);
        before - self.drops.len()
    }

    /// Drop everything. Ids keep counting up.
    pub fn clear(&mut self) {
        self.drops.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpillDrop> {
        self.drops.iter()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Total number of drops ever emitted
    pub fn emitted(&self) -> u64 {
        self.next_id - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_at(x: f32) -> DropSpawn {
        DropSpawn {
            x,
            y: 100.0,
            size: 6.0,
            velocity_x: 80.0,
            velocity_y: 0.0,
        }
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut field = DropField::new(&DropConfig::default());
        let a = field.emit(spawn_at(0.0), 0);
        let b = field.emit(spawn_at(1.0), 0);
        field.clear();
        let c = field.emit(spawn_at(2.0), 0);
        assert!(a < b && b < c);
        assert_eq!(field.emitted(), 3);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let config = DropConfig {
            max_drops: 3,
            ..DropConfig::default()
        };
        let mut field = DropField::new(&config);
        for i in 0..5 {
            field.emit(spawn_at(i as f32), i);
        }
        assert_eq!(field.len(), 3);
        let xs: Vec<f32> = field.iter().map(|d| d.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sweep_removes_expired() {
        let mut field = DropField::new(&DropConfig::default());
        field.emit(spawn_at(0.0), 0);
        field.emit(spawn_at(1.0), 1500);
        assert_eq!(field.sweep(2500), 1);
        assert!(field.iter().all(|d| d.age(2500) <= 2000));
        assert_eq!(field.sweep(3600), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_trajectory_falls_faster_over_time_and_fades() {
        let drop = SpillDrop {
            id: DropId(1),
            x: 10.0,
            y: 0.0,
            size: 6.0,
            velocity_x: 100.0,
            velocity_y: 0.0,
            born_at: 0,
        };
        let a = drop.frame_at(300, 1200, 600.0);
        let b = drop.frame_at(600, 1200, 600.0);
        let c = drop.frame_at(900, 1200, 600.0);
        // Accelerating fall: later intervals cover more distance
        assert!(c.y - b.y > b.y - a.y);
        assert!(a.opacity > b.opacity && b.opacity > c.opacity);

        let end = drop.frame_at(5000, 1200, 600.0);
        assert_eq!(end.opacity, 0.0);
        assert_eq!(end.scale, 0.0);
        assert!((end.x - 130.0).abs() < 1e-3);
        assert!((end.y - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let config = DropConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let spawn = DropSpawn::jittered(&mut rng, (50.0, 50.0), Side::Left, &config);
            assert!((spawn.x - 50.0).abs() <= 4.0);
            assert!((4.0..=8.0).contains(&spawn.size));
            assert!((-120.0..=-40.0).contains(&spawn.velocity_x));
            assert!((0.0..=60.0).contains(&spawn.velocity_y));
        }
    }
}
