//! Home position, home zone and the dock-or-fall decision on release.

use crate::animation::Transform;
use crate::config::DockConfig;
use crate::widgets::{Rect, Viewport};

/// How the cup is moving. Exactly one holds at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// At home, possibly still easing back into place
    Docked,
    /// Following the pointer
    Dragging,
    /// Released away from home: shedding the burst, then dropping
    Falling,
    /// Off screen; only the reset button is shown
    Fallen,
}

/// Outcome of releasing the cup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    Dock,
    Fall,
}

/// Where the cup rests in a viewport
pub fn home_rect(viewport: &Viewport, config: &DockConfig) -> Rect {
    Rect::new(
        viewport.width - config.home_right,
        config.home_top,
        config.cup_width,
        config.cup_height,
    )
}

/// The top-right region where letting go docks the cup
pub fn home_zone(viewport: &Viewport, config: &DockConfig) -> Rect {
    Rect::new(
        viewport.width - config.zone_width,
        0.0,
        config.zone_width,
        config.zone_height,
    )
}

/// Dock when the centre of the cup is inside the home zone, fall otherwise
pub fn resolve_release(cup: &Rect, viewport: &Viewport, config: &DockConfig) -> Release {
    let (cx, cy) = cup.center();
    if home_zone(viewport, config).contains(cx, cy) {
        Release::Dock
    } else {
        Release::Fall
    }
}

/// End placement of the fall: below the viewport, turned in the direction
/// the cup was last thrown.
pub fn fall_target(
    from: &Transform,
    viewport: &Viewport,
    config: &DockConfig,
    last_velocity_x: f32,
) -> Transform {
    let direction = if last_velocity_x < 0.0 { -1.0 } else { 1.0 };
    let below = viewport.height - config.home_top + config.cup_height.max(config.cup_width) * 1.5;
    Transform {
        translate: (from.translate.0 + direction * config.cup_width, below),
        rotate: from.rotate + direction * config.fall_rotation.to_radians(),
    }
}

/// The button that replaces a fallen cup
pub fn reset_button(viewport: &Viewport, config: &DockConfig) -> Rect {
    let home = home_rect(viewport, config);
    let (cx, cy) = home.center();
    Rect::new(cx - 44.0, cy - 16.0, 88.0, 32.0)
}
