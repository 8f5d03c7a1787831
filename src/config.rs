use crate::animation::{Easing, SpringConfig, Transition};
use crate::schedule::Millis;

/// Gains that turn pointer motion into tilt
#[derive(Clone, Debug, PartialEq)]
pub struct TiltConfig {
    /// Degrees of tilt per px/s of horizontal velocity
    pub velocity_gain: f32,
    /// Degrees of tilt per (px/s)/ms of horizontal acceleration
    pub acceleration_gain: f32,
    /// Symmetric clamp in degrees
    pub max_tilt: f32,
    /// With no drag sample for this long the pointer counts as resting
    pub idle_after_ms: Millis,
    /// Smoothing spring between raw and displayed tilt
    pub spring: SpringConfig,
    /// Liquid surface counter-rotation limit in degrees
    pub max_surface_angle: f32,
    /// Slosh offset in px at full tilt
    pub max_slosh: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            velocity_gain: 0.018,
            acceleration_gain: 0.7,
            max_tilt: 75.0,
            idle_after_ms: 80,
            spring: SpringConfig::TILT,
            max_surface_angle: 45.0,
            max_slosh: 6.0,
        }
    }
}

/// Pouring thresholds and depletion rate
#[derive(Clone, Debug, PartialEq)]
pub struct PourConfig {
    /// |tilt| above this starts pouring (degrees)
    pub threshold: f32,
    /// Pouring stops once |tilt| falls below `threshold - hysteresis`
    pub hysteresis: f32,
    /// Time between pour ticks
    pub cadence_ms: Millis,
    /// Level lost per tick per degree beyond the threshold
    pub depletion_gain: f32,
    pub min_depletion: f32,
    pub max_depletion: f32,
    /// Release burst emits `floor(level / burst_divisor)` drops
    pub burst_divisor: f32,
    /// Delay between burst drops
    pub burst_stagger_ms: Millis,
}

impl Default for PourConfig {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            hysteresis: 5.0,
            cadence_ms: 50,
            depletion_gain: 0.08,
            min_depletion: 0.2,
            max_depletion: 2.5,
            burst_divisor: 4.0,
            burst_stagger_ms: 30,
        }
    }
}

/// Spill drop sizes, jitter and lifetimes
#[derive(Clone, Debug, PartialEq)]
pub struct DropConfig {
    /// Oldest drops are evicted beyond this many
    pub max_drops: usize,
    /// Drops older than this are swept
    pub lifetime_ms: Millis,
    pub sweep_interval_ms: Millis,
    /// Length of the fall animation
    pub fall_duration_ms: Millis,
    /// Random offset applied to the emission point, each axis
    pub position_jitter: f32,
    pub size_range: (f32, f32),
    /// Horizontal speed range in px/s, signed by the pour side
    pub speed_x_range: (f32, f32),
    /// Initial downward speed range in px/s
    pub speed_y_range: (f32, f32),
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            max_drops: 30,
            lifetime_ms: 2000,
            sweep_interval_ms: 500,
            fall_duration_ms: 1200,
            position_jitter: 4.0,
            size_range: (4.0, 8.0),
            speed_x_range: (40.0, 120.0),
            speed_y_range: (0.0, 60.0),
        }
    }
}

/// Where the cup lives and how it returns or falls
#[derive(Clone, Debug, PartialEq)]
pub struct DockConfig {
    pub cup_width: f32,
    pub cup_height: f32,
    /// Distance from the right edge of the viewport to the cup's left side
    pub home_right: f32,
    /// Distance from the top of the viewport to the cup
    pub home_top: f32,
    /// Width of the home zone, measured from the right edge
    pub zone_width: f32,
    /// Height of the home zone, measured from the top
    pub zone_height: f32,
    pub dock: Transition,
    pub fall: Transition,
    /// Rotation reached at the end of the fall, degrees
    pub fall_rotation: f32,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            cup_width: 64.0,
            cup_height: 80.0,
            home_right: 120.0,
            home_top: 40.0,
            zone_width: 150.0,
            zone_height: 150.0,
            dock: Transition::new(400, Easing::Standard),
            fall: Transition::new(900, Easing::EaseIn),
            fall_rotation: 120.0,
        }
    }
}

/// Steam plume above the cup
#[derive(Clone, Debug, PartialEq)]
pub struct SteamConfig {
    pub particles: usize,
    /// Lifetime range in frames
    pub life_range: (f32, f32),
    /// How strongly cup displacement pushes steam the other way
    pub wind: f32,
    /// Upward drift range in px per frame
    pub rise_range: (f32, f32),
    /// Half-width of the spawn area around the rim centre
    pub spread: f32,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            particles: 20,
            life_range: (100.0, 150.0),
            wind: 0.5,
            rise_range: (0.3, 0.8),
            spread: 14.0,
        }
    }
}

/// Full configuration of a cup widget
#[derive(Clone, Debug, PartialEq)]
pub struct CupConfig {
    pub tilt: TiltConfig,
    pub pour: PourConfig,
    pub drops: DropConfig,
    pub dock: DockConfig,
    pub steam: SteamConfig,
    /// Coffee level on mount and after reset
    pub initial_level: f32,
    /// Frame period while something is animating
    pub frame_interval_ms: Millis,
    /// Seed for emission jitter and steam
    pub seed: u64,
}

impl Default for CupConfig {
    fn default() -> Self {
        Self {
            tilt: TiltConfig::default(),
            pour: PourConfig::default(),
            drops: DropConfig::default(),
            dock: DockConfig::default(),
            steam: SteamConfig::default(),
            initial_level: 100.0,
            frame_interval_ms: 16,
            seed: 0x00C0_FFEE,
        }
    }
}

impl CupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn initial_level(mut self, level: f32) -> Self {
        self.initial_level = level;
        self
    }

    pub fn frame_interval_ms(mut self, interval: Millis) -> Self {
        self.frame_interval_ms = interval.max(1);
        self
    }

    pub fn tilt(mut self, tilt: TiltConfig) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn pour(mut self, pour: PourConfig) -> Self {
        self.pour = pour;
        self
    }

    pub fn drops(mut self, drops: DropConfig) -> Self {
        self.drops = drops;
        self
    }

    pub fn dock(mut self, dock: DockConfig) -> Self {
        self.dock = dock;
        self
    }

    pub fn steam(mut self, steam: SteamConfig) -> Self {
        self.steam = steam;
        self
    }
}
