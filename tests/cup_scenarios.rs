//! End-to-end cup behavior driven through the `Widget` interface with a
//! virtual clock.

use cuppa::prelude::*;
use cuppa::widgets::cup::reset_button;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;
const FRAME: Millis = 16;

fn mounted(config: CupConfig) -> CupWidget {
    let mut cup = CupWidget::new(config);
    cup.event(
        &Event::Resize {
            width: WIDTH,
            height: HEIGHT,
        },
        0,
    );
    cup.mount(0);
    cup
}

fn press(cup: &mut CupWidget, x: f32, y: f32, t: Millis) -> EventResponse {
    cup.advance(t);
    cup.event(
        &Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        },
        t,
    )
}

/// Press on the centre of the cup; returns the pointer position
fn grab(cup: &mut CupWidget, t: Millis) -> (f32, f32) {
    let (x, y) = cup.cup_rect().map(|r| r.center()).unwrap();
    assert_eq!(press(cup, x, y, t), EventResponse::Handled);
    (x, y)
}

fn move_to(cup: &mut CupWidget, x: f32, y: f32, t: Millis) {
    cup.advance(t);
    cup.event(&Event::MouseMove { x, y }, t);
}

fn release(cup: &mut CupWidget, x: f32, y: f32, t: Millis) {
    cup.advance(t);
    cup.event(
        &Event::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        },
        t,
    );
}

/// Advance frame by frame from `from` to `to`
fn run(cup: &mut CupWidget, from: Millis, to: Millis) -> Millis {
    let mut t = from;
    while t < to {
        t = (t + FRAME).min(to);
        cup.advance(t);
    }
    to
}

/// Drag from `start` by `(dx, dy)` every `step_ms`, `steps` times.
/// Returns the final pointer position and time.
fn drag(
    cup: &mut CupWidget,
    start: (f32, f32),
    delta: (f32, f32),
    step_ms: Millis,
    steps: usize,
    mut t: Millis,
) -> ((f32, f32), Millis) {
    let (mut x, mut y) = start;
    for _ in 0..steps {
        t += step_ms;
        x += delta.0;
        y += delta.1;
        move_to(cup, x, y, t);
    }
    ((x, y), t)
}

/// Drag slowly down and to the left until the pointer is well outside the
/// home zone, without tilting enough to pour
fn walk_away(cup: &mut CupWidget, t: Millis) -> ((f32, f32), Millis) {
    let start = grab(cup, t);
    drag(cup, start, (-4.0, 4.0), FRAME, 140, t)
}

#[test]
fn test_level_stays_in_bounds_under_random_drags() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut cup = mounted(CupConfig::default());
    let mut t = 0;

    for _ in 0..12 {
        cup.reset(t);
        let (mut x, mut y) = grab(&mut cup, t);
        let mut last_level = cup.coffee_level();

        for _ in 0..80 {
            t += rng.gen_range(1..=25);
            x += rng.gen_range(-80.0..80.0);
            y += rng.gen_range(-20.0..20.0);
            move_to(&mut cup, x, y, t);

            let state = cup.state();
            assert!((0.0..=100.0).contains(&state.coffee_level));
            assert!(state.coffee_level <= last_level);
            assert!(state.tilt.abs() <= 75.0);
            last_level = state.coffee_level;
        }

        release(&mut cup, x, y, t);
        t = run(&mut cup, t, t + 1500);
        assert!((0.0..=100.0).contains(&cup.coffee_level()));
    }
}

#[test]
fn test_fast_drag_pours_and_drains() {
    let mut cup = mounted(CupConfig::default());
    let start = grab(&mut cup, 0);

    let mut poured = false;
    let (mut x, mut t) = (start.0, 0);
    for _ in 0..30 {
        t += 10;
        x -= 25.0;
        move_to(&mut cup, x, start.1, t);
        if cup.pour_state() == PourState::Pouring {
            poured = true;
            assert!(cup.is_pour_timer_active());
        }
    }

    assert!(poured);
    assert!(cup.coffee_level() < 100.0);
    assert!(cup.drops().emitted() > 0);
    // Moving left tilts right, so drops leave from the right rim
    assert!(cup.tilt() > 0.0);
    assert!(cup.state().spill_drops.iter().all(|d| d.velocity_x > 0.0));
}

#[test]
fn test_no_drops_once_empty() {
    let mut cup = mounted(CupConfig::default().initial_level(1.0));
    let start = grab(&mut cup, 0);

    let (pos, t) = drag(&mut cup, start, (-25.0, 0.0), 10, 40, 0);
    assert_eq!(cup.coffee_level(), 0.0);
    assert_eq!(cup.pour_state(), PourState::Idle);
    let emitted = cup.drops().emitted();
    assert!(emitted > 0);

    // Keep swinging the empty cup around
    let (pos, t) = drag(&mut cup, pos, (40.0, 0.0), 10, 20, t);
    let (_, t) = drag(&mut cup, pos, (-40.0, 0.0), 10, 20, t);
    run(&mut cup, t, t + 500);

    assert_eq!(cup.drops().emitted(), emitted);
    assert_eq!(cup.pour_state(), PourState::Idle);
    assert!(!cup.is_pour_timer_active());
}

#[test]
fn test_tilt_is_clamped_for_extreme_motion() {
    let mut cup = mounted(CupConfig::default());
    let (x, y) = grab(&mut cup, 0);

    for i in 1..=200u64 {
        let jump = if i % 2 == 0 { 1.0e7 } else { -1.0e7 };
        move_to(&mut cup, x + jump, y, i);
        assert!(cup.tilt().abs() <= 75.0, "tilt {} at step {}", cup.tilt(), i);
        assert!(cup.readout().surface_angle.abs() <= 45.0);
    }

    move_to(&mut cup, f32::NAN, y, 300);
    assert!(cup.tilt().is_finite());
}

#[test]
fn test_reset_is_idempotent() {
    let mut cup = mounted(CupConfig::default());
    let start = grab(&mut cup, 0);
    let (pos, t) = drag(&mut cup, start, (-25.0, 10.0), 10, 30, 0);
    release(&mut cup, pos.0, pos.1, t);
    let t = run(&mut cup, t, t + 100);

    cup.reset(t);
    let once = cup.state();
    cup.reset(t);
    let twice = cup.state();

    assert_eq!(once, twice);
    assert_eq!(once.coffee_level, 100.0);
    assert_eq!(once.tilt, 0.0);
    assert!(once.spill_drops.is_empty());
    assert_eq!(once.motion, MotionState::Docked);
    assert_eq!(once.pour, PourState::Idle);
    assert!(cup.cup_transform().is_identity());
    // Only the sweep survives a reset
    assert_eq!(cup.pending_tasks(), 1);
}

#[test]
fn test_release_in_home_zone_docks() {
    let mut cup = mounted(CupConfig::default());
    let start = grab(&mut cup, 0);
    let (pos, t) = drag(&mut cup, start, (-2.0, 1.0), FRAME, 5, 0);
    let (pos, t) = drag(&mut cup, pos, (2.0, -1.0), FRAME, 5, t);
    release(&mut cup, pos.0, pos.1, t);

    let state = cup.state();
    assert_eq!(state.motion, MotionState::Docked);
    assert!(!state.has_fallen);
    assert_eq!(cup.drops().emitted(), 0);
    assert_eq!(cup.coffee_level(), 100.0);

    run(&mut cup, t, t + 500);
    assert!(cup.cup_transform().is_identity());
    assert_eq!(cup.drops().emitted(), 0);
}

#[test]
fn test_release_away_from_home_spills_burst_then_falls() {
    let mut cup = mounted(CupConfig::default().initial_level(40.0));
    let (pos, t) = walk_away(&mut cup, 0);
    assert_eq!(cup.drops().emitted(), 0);
    assert_eq!(cup.coffee_level(), 40.0);

    release(&mut cup, pos.0, pos.1, t);
    assert_eq!(cup.motion(), MotionState::Falling);

    let mut now = t;
    while !cup.state().has_fallen {
        assert!(now < t + 3000, "cup never fell");
        now += FRAME;
        cup.advance(now);
    }

    assert_eq!(cup.drops().emitted(), 10);
    assert_eq!(cup.coffee_level(), 0.0);

    run(&mut cup, now, now + 1000);
    assert_eq!(cup.drops().emitted(), 10);
}

/// Run until the cup has fallen; returns its resting placement
fn fall(cup: &mut CupWidget, t: Millis) -> Transform {
    let mut now = t;
    while !cup.state().has_fallen {
        assert!(now < t + 5000, "cup never fell");
        now += FRAME;
        cup.advance(now);
    }
    cup.cup_transform()
}

#[test]
fn test_late_release_falls_in_throw_direction() {
    let mut cup = mounted(CupConfig::default());
    let (pos, t) = walk_away(&mut cup, 0);
    let released_x = cup.cup_transform().translate.0;

    // The button comes up where the pointer already is, a little later
    release(&mut cup, pos.0, pos.1, t + 8);
    assert_eq!(cup.motion(), MotionState::Falling);

    let rest = fall(&mut cup, t + 8);
    assert!(rest.rotate < 0.0, "leftward throw turned by {}", rest.rotate);
    assert!(rest.translate.0 < released_x);
}

#[test]
fn test_pointer_leaving_mid_drag_falls_in_throw_direction() {
    let mut cup = mounted(CupConfig::default());
    let (_, t) = walk_away(&mut cup, 0);

    cup.advance(t + 30);
    assert_eq!(cup.event(&Event::MouseLeave, t + 30), EventResponse::Handled);
    assert_eq!(cup.motion(), MotionState::Falling);

    let rest = fall(&mut cup, t + 30);
    assert!(rest.rotate < 0.0, "leftward throw turned by {}", rest.rotate);
}

#[test]
fn test_steady_fifty_degree_drag_pours_on_cadence() {
    let config = CupConfig::default();
    let step = 50.0 / config.tilt.velocity_gain / 100.0;
    let mut cup = mounted(config);
    let start = grab(&mut cup, 0);

    // A steady leftward drag holds the tilt at 50 degrees once settled
    let (pos, t) = drag(&mut cup, start, (-step, 0.0), 10, 100, 0);
    assert!((cup.tilt() - 50.0).abs() < 0.5, "tilt {}", cup.tilt());
    assert_eq!(cup.pour_state(), PourState::Pouring);

    let level = cup.coffee_level();
    let emitted = cup.drops().emitted();
    drag(&mut cup, pos, (-step, 0.0), 10, 50, t);

    assert_eq!(cup.drops().emitted() - emitted, 10);
    let drained = level - cup.coffee_level();
    assert!((drained - 16.0).abs() < 0.1, "drained {}", drained);
}

#[test]
fn test_release_with_empty_cup_falls_without_burst() {
    let mut cup = mounted(CupConfig::default().initial_level(0.0));
    let (pos, t) = walk_away(&mut cup, 0);
    release(&mut cup, pos.0, pos.1, t);
    run(&mut cup, t, t + 1200);

    assert!(cup.state().has_fallen);
    assert_eq!(cup.drops().emitted(), 0);
}

#[test]
fn test_fallen_cup_paints_reset_button_and_click_resets() {
    let config = CupConfig::default();
    let mut cup = mounted(config.clone());
    let (pos, t) = walk_away(&mut cup, 0);
    release(&mut cup, pos.0, pos.1, t);
    // Long enough for the fall and for every burst drop to be swept
    let t = run(&mut cup, t, t + 5000);
    assert!(cup.state().has_fallen);
    assert!(cup.state().spill_drops.is_empty());

    let mut ctx = PaintContext::new();
    cup.paint(&mut ctx, t);
    assert_eq!(ctx.len(), 2, "only the button and its label are painted");

    // Presses elsewhere do nothing
    assert_eq!(press(&mut cup, 10.0, 10.0, t), EventResponse::Ignored);

    let viewport = cup.viewport().unwrap();
    let (bx, by) = reset_button(&viewport, &config.dock).center();
    assert_eq!(press(&mut cup, bx, by, t + 10), EventResponse::Handled);
    let state = cup.state();
    assert_eq!(state.motion, MotionState::Docked);
    assert_eq!(state.coffee_level, 100.0);
}

#[test]
fn test_sweep_removes_expired_drops() {
    let mut cup = mounted(CupConfig::default());
    let (pos, t) = walk_away(&mut cup, 0);
    release(&mut cup, pos.0, pos.1, t);
    let end = t + 6000;

    // Stop exactly on every sweep tick and look at what survived it
    let mut now = t;
    let mut sweep_at = (t / 500 + 1) * 500;
    while sweep_at <= end {
        now = run(&mut cup, now, sweep_at);
        for drop in cup.state().spill_drops.iter() {
            assert!(
                drop.age(now) <= 2000,
                "drop {} outlived its sweep",
                drop.id.get()
            );
        }
        sweep_at += 500;
    }

    assert!(cup.drops().emitted() > 0);
    assert!(cup.state().spill_drops.is_empty());
}

#[test]
fn test_drop_ids_are_increasing() {
    let mut cup = mounted(CupConfig::default());
    let start = grab(&mut cup, 0);
    drag(&mut cup, start, (-25.0, 0.0), 10, 30, 0);

    let ids: Vec<u64> = cup.state().spill_drops.iter().map(|d| d.id.get()).collect();
    assert!(!ids.is_empty());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_leaving_pouring_cancels_pour_task() {
    let mut cup = mounted(CupConfig::default());
    let start = grab(&mut cup, 0);
    let (_, t) = drag(&mut cup, start, (-25.0, 0.0), 10, 20, 0);
    assert_eq!(cup.pour_state(), PourState::Pouring);
    assert!(cup.is_pour_timer_active());

    // Hold the pointer still: the tilt relaxes and pouring stops
    run(&mut cup, t, t + 1500);
    assert!(cup.state().is_dragging);
    assert_eq!(cup.pour_state(), PourState::Idle);
    assert!(!cup.is_pour_timer_active());
    assert_eq!(cup.pending_tasks(), 1);
}

#[test]
fn test_unmounted_cup_ignores_everything() {
    let mut cup = mounted(CupConfig::default());
    let (x, y) = cup.cup_rect().map(|r| r.center()).unwrap();
    cup.unmount();

    assert_eq!(press(&mut cup, x, y, 10), EventResponse::Ignored);
    assert!(!cup.advance(5000));
    assert_eq!(cup.next_deadline(), None);
    assert_eq!(cup.pending_tasks(), 0);
    assert_eq!(cup.motion(), MotionState::Docked);
}

#[test]
fn test_no_viewport_is_inert() {
    let mut cup = CupWidget::new(CupConfig::default());
    cup.mount(0);

    assert_eq!(press(&mut cup, 1192.0, 80.0, 5), EventResponse::Ignored);
    cup.advance(2000);
    assert_eq!(cup.state().motion, MotionState::Docked);
    assert!(cup.cup_rect().is_none());

    let mut ctx = PaintContext::new();
    cup.paint(&mut ctx, 2000);
    assert!(ctx.is_empty());

    cup.event(
        &Event::Resize {
            width: 0.0,
            height: 600.0,
        },
        2000,
    );
    assert!(cup.viewport().is_none());
}

#[test]
fn test_change_flags_track_repaints() {
    let mut cup = mounted(CupConfig::default());
    assert!(cup.take_changes().needs_paint());
    assert!(!cup.take_changes().needs_paint());

    let start = grab(&mut cup, 10);
    assert!(cup.take_changes().contains(ChangeFlags::MOTION));

    drag(&mut cup, start, (-25.0, 0.0), 10, 20, 10);
    let changes = cup.take_changes();
    assert!(changes.contains(ChangeFlags::LEVEL));
    assert!(changes.contains(ChangeFlags::DROPS));
}
