//! The interactive coffee cup.
//!
//! Drag the cup and it tilts against the motion. Tilt it far enough and it
//! pours, shedding drops that fall off the bottom of the screen. Let go near
//! home and it docks; let go anywhere else and it spills what is left and
//! falls, leaving a reset button behind.

mod dock;
mod drops;
mod pour;
mod steam;
mod tilt;

pub use dock::{
    fall_target, home_rect, home_zone, reset_button, resolve_release, MotionState, Release,
};
pub use drops::{DropField, DropFrame, DropId, DropSpawn, SpillDrop};
pub use pour::{CoffeeLevel, PourMachine, PourState, PourTick, PourTransition, Side};
pub use steam::{SteamField, SteamParticle};
pub use tilt::{raw_tilt, TiltEngine, TiltReadout};

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::widget::{ChangeFlags, Event, EventResponse, MouseButton, Widget};
use super::{Color, Rect, Viewport};
use crate::animation::{Transform, Tween};
use crate::config::CupConfig;
use crate::renderer::{PaintContext, Placement};
use crate::schedule::{Fired, Millis, Scheduler, TaskId};

const CUP_COLOR: Color = Color::from_hex(0xF0F0F0);
const RIM_COLOR: Color = Color::from_hex(0xD8D8D8);
const COFFEE_COLOR: Color = Color::from_hex(0x3B2616);
const STEAM_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.3);
const LABEL_COLOR: Color = Color::from_hex(0x202020);

/// Frames of steam simulated at most per advance; longer gaps are skipped
const MAX_STEAM_FRAMES: u64 = 240;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    PourTick,
    Sweep,
    BurstDrop,
    FallStart,
    FallComplete,
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    /// Pointer position minus cup offset at grab time
    grab: (f32, f32),
    /// Latest pointer position
    pointer: (f32, f32),
    /// Pointer position of the last velocity sample, taken at `last_at`
    sample: (f32, f32),
    last_at: Millis,
    /// Cup translation from home
    offset: (f32, f32),
}

/// Snapshot of everything observable about the cup
#[derive(Clone, Debug, PartialEq)]
pub struct CupState {
    pub coffee_level: f32,
    pub tilt: f32,
    pub is_dragging: bool,
    pub has_fallen: bool,
    pub spill_drops: VecDeque<SpillDrop>,
    pub motion: MotionState,
    pub pour: PourState,
}

pub struct CupWidget {
    config: CupConfig,
    viewport: Option<Viewport>,
    mounted: bool,
    clock: Millis,

    level: CoffeeLevel,
    tilt: TiltEngine,
    pour: PourMachine,
    drops: DropField,
    steam: SteamField,

    motion: MotionState,
    drag: Option<DragSession>,
    /// Cup placement relative to home outside of drags (dock and fall)
    placement: Tween<Transform>,
    /// Last non-zero horizontal drag velocity; picks the fall direction
    last_velocity_x: f32,
    burst_side: Side,

    scheduler: Scheduler<Task>,
    pour_task: Option<TaskId>,
    sweep_task: Option<TaskId>,

    steam_clock: Millis,
    steam_anchor: (f32, f32),

    rng: StdRng,
    changes: ChangeFlags,
}

impl CupWidget {
    pub fn new(config: CupConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let steam = SteamField::new(config.steam.clone(), &mut rng);
        Self {
            viewport: None,
            mounted: false,
            clock: 0,
            level: CoffeeLevel::new(config.initial_level),
            tilt: TiltEngine::new(config.tilt.clone()),
            pour: PourMachine::new(config.pour.clone()),
            drops: DropField::new(&config.drops),
            steam,
            motion: MotionState::Docked,
            drag: None,
            placement: Tween::new(Transform::IDENTITY),
            last_velocity_x: 0.0,
            burst_side: Side::Right,
            scheduler: Scheduler::new(),
            pour_task: None,
            sweep_task: None,
            steam_clock: 0,
            steam_anchor: (0.0, 0.0),
            rng,
            changes: ChangeFlags::all(),
            config,
        }
    }

    /// Start the widget's periodic work at `now`
    pub fn mount(&mut self, now: Millis) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.clock = now;
        self.steam_clock = now;
        self.tilt.reset(now);
        self.sweep_task = Some(self.scheduler.schedule_every(
            Task::Sweep,
            now,
            self.config.drops.sweep_interval_ms,
        ));
        log::debug!("Cup mounted at {}ms", now);
    }

    /// Cancel every timer. The widget ignores input until mounted again.
    pub fn unmount(&mut self) {
        self.scheduler.clear();
        self.pour.stop();
        self.pour_task = None;
        self.sweep_task = None;
        self.mounted = false;
        log::debug!("Cup unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &CupConfig {
        &self.config
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.changes |= ChangeFlags::MOTION;
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn state(&self) -> CupState {
        CupState {
            coffee_level: self.level.get(),
            tilt: self.tilt.tilt(),
            is_dragging: self.motion == MotionState::Dragging,
            has_fallen: self.motion == MotionState::Fallen,
            spill_drops: self.drops.iter().cloned().collect(),
            motion: self.motion,
            pour: self.pour.state(),
        }
    }

    pub fn coffee_level(&self) -> f32 {
        self.level.get()
    }

    pub fn tilt(&self) -> f32 {
        self.tilt.tilt()
    }

    pub fn readout(&self) -> TiltReadout {
        self.tilt.readout()
    }

    pub fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn pour_state(&self) -> PourState {
        self.pour.state()
    }

    pub fn drops(&self) -> &DropField {
        &self.drops
    }

    /// Whether the pour interval is currently scheduled
    pub fn is_pour_timer_active(&self) -> bool {
        self.pour_task
            .is_some_and(|id| self.scheduler.is_scheduled(id))
    }

    /// Number of scheduled timer tasks
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Placement of the cup relative to its home rectangle
    pub fn cup_transform(&self) -> Transform {
        match (self.motion, &self.drag) {
            (MotionState::Dragging, Some(drag)) => {
                Transform::translate(drag.offset.0, drag.offset.1)
                    .rotated(self.tilt.readout().cup_rotation.to_radians())
            }
            _ => *self.placement.current(),
        }
    }

    /// Unrotated screen rectangle of the cup, once the viewport is known
    pub fn cup_rect(&self) -> Option<Rect> {
        let viewport = self.viewport?;
        let home = home_rect(&viewport, &self.config.dock);
        let transform = self.cup_transform();
        Some(home.offset(transform.translate.0, transform.translate.1))
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, x: f32, y: f32, now: Millis) -> EventResponse {
        let Some(viewport) = self.viewport.filter(|_| self.mounted) else {
            return EventResponse::Ignored;
        };
        self.run_due(now);

        match self.motion {
            MotionState::Fallen => {
                if reset_button(&viewport, &self.config.dock).contains(x, y) {
                    self.reset(now);
                    return EventResponse::Handled;
                }
                EventResponse::Ignored
            }
            MotionState::Docked => {
                let Some(rect) = self.cup_rect().filter(|rect| rect.contains(x, y)) else {
                    return EventResponse::Ignored;
                };
                let offset = (rect.x - self.home(&viewport).x, rect.y - self.home(&viewport).y);
                self.drag = Some(DragSession {
                    grab: (x - offset.0, y - offset.1),
                    pointer: (x, y),
                    sample: (x, y),
                    last_at: now,
                    offset,
                });
                self.placement.set_immediate(Transform::translate(offset.0, offset.1));
                self.motion = MotionState::Dragging;
                self.last_velocity_x = 0.0;
                self.tilt.begin(now);
                self.steam_anchor = offset;
                self.changes |= ChangeFlags::MOTION;
                log::debug!("Drag started at ({:.1}, {:.1})", x, y);
                EventResponse::Handled
            }
            MotionState::Dragging | MotionState::Falling => EventResponse::Ignored,
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: Millis) -> EventResponse {
        if !self.mounted || self.motion != MotionState::Dragging {
            return EventResponse::Ignored;
        }
        self.run_due(now);

        let Some(mut drag) = self.drag else {
            return EventResponse::Ignored;
        };
        if !(x.is_finite() && y.is_finite()) {
            return EventResponse::Handled;
        }

        let dt = now.saturating_sub(drag.last_at);
        if dt > 0 {
            let velocity_x = (x - drag.sample.0) / dt as f32 * 1000.0;
            self.tilt.sample(velocity_x, dt as f32, now);
            if velocity_x != 0.0 {
                self.last_velocity_x = velocity_x;
            }
            drag.sample = (x, y);
            drag.last_at = now;
        }
        drag.pointer = (x, y);
        drag.offset = (x - drag.grab.0, y - drag.grab.1);
        self.drag = Some(drag);
        self.changes |= ChangeFlags::MOTION;

        self.evaluate_pour(now);
        EventResponse::Handled
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, now: Millis) -> EventResponse {
        if !self.mounted || self.motion != MotionState::Dragging {
            return EventResponse::Ignored;
        }
        // A release where the pointer already is adds no motion sample
        let moved = self.drag.is_some_and(|drag| drag.pointer != (x, y));
        if moved && x.is_finite() && y.is_finite() {
            self.pointer_move(x, y, now);
        }
        self.release(now);
        EventResponse::Handled
    }

    fn release(&mut self, now: Millis) {
        self.run_due(now);
        let released = self.cup_transform();
        let release_tilt = self.tilt.tilt();

        self.tilt.release(now);
        self.stop_pour();
        self.drag = None;
        self.placement.set_immediate(released);
        self.changes |= ChangeFlags::MOTION;

        let Some(viewport) = self.viewport else {
            self.motion = MotionState::Docked;
            self.placement.set_immediate(Transform::IDENTITY);
            return;
        };
        let rect = self.home(&viewport).offset(released.translate.0, released.translate.1);

        match resolve_release(&rect, &viewport, &self.config.dock) {
            Release::Dock => {
                self.motion = MotionState::Docked;
                self.placement
                    .animate_to(Transform::IDENTITY, now, self.config.dock.dock);
                log::debug!("Released in home zone, docking");
            }
            Release::Fall => {
                self.motion = MotionState::Falling;
                self.burst_side = Side::from_tilt(release_tilt);
                let burst = self.pour.burst_count(self.level);
                let stagger = self.config.pour.burst_stagger_ms;
                for i in 0..burst {
                    self.scheduler
                        .schedule_once(Task::BurstDrop, now + i as Millis * stagger);
                }
                self.scheduler
                    .schedule_once(Task::FallStart, now + burst as Millis * stagger);
                self.steam.hide();
                log::debug!(
                    "Released outside home zone with level {:.1}, spilling {} drops",
                    self.level.get(),
                    burst
                );
            }
        }
    }

    /// Refill and re-dock. Allowed in any state; repeated calls are no-ops.
    pub fn reset(&mut self, now: Millis) {
        self.scheduler.cancel_where(|task| *task != Task::Sweep);
        self.pour.stop();
        self.pour_task = None;
        self.level = CoffeeLevel::new(self.config.initial_level);
        self.drops.clear();
        self.tilt.reset(now);
        self.drag = None;
        self.motion = MotionState::Docked;
        self.placement.set_immediate(Transform::IDENTITY);
        self.last_velocity_x = 0.0;
        self.steam.reset(&mut self.rng);
        self.steam_anchor = (0.0, 0.0);
        self.steam_clock = now;
        self.clock = self.clock.max(now);
        self.changes = ChangeFlags::all();
        log::debug!("Cup reset");
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Fire every task due by `now` in order, bringing continuous state to
    /// each task's due time first.
    fn run_due(&mut self, now: Millis) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.sync_to(fired.due);
            self.handle(fired);
        }
        self.sync_to(now);
    }

    fn sync_to(&mut self, t: Millis) {
        if t < self.clock {
            return;
        }
        self.tilt.advance_to(t);
        if self.placement.advance(t).is_changed() {
            self.changes |= ChangeFlags::MOTION;
        }
        self.clock = t;
        self.evaluate_pour(t);
    }

    fn handle(&mut self, fired: Fired<Task>) {
        let t = fired.due;
        match fired.task {
            Task::PourTick => {
                let tilt = self.tilt.tilt();
                if let Some(tick) = self.pour.tick(tilt, &mut self.level) {
                    self.changes |= ChangeFlags::LEVEL;
                    if let Some(origin) = self.rim_point(tick.side) {
                        self.emit_drop(origin, tick.side, t);
                    }
                }
                if self.level.is_empty() {
                    self.stop_pour();
                }
            }
            Task::Sweep => {
                if self.drops.sweep(t) > 0 {
                    self.changes |= ChangeFlags::DROPS;
                }
            }
            Task::BurstDrop => {
                if self.motion != MotionState::Falling || self.level.is_empty() {
                    return;
                }
                self.level.drain(self.config.pour.burst_divisor);
                self.changes |= ChangeFlags::LEVEL;
                let side = self.burst_side;
                if let Some(origin) = self.rim_point(side) {
                    self.emit_drop(origin, side, t);
                }
            }
            Task::FallStart => {
                let Some(viewport) = self.viewport else {
                    self.scheduler.schedule_once(Task::FallComplete, t);
                    return;
                };
                let from = *self.placement.current();
                let target = fall_target(
                    &from,
                    &viewport,
                    &self.config.dock,
                    self.last_velocity_x,
                );
                let fall = self.config.dock.fall;
                self.placement.animate_to(target, t, fall);
                self.scheduler
                    .schedule_once(Task::FallComplete, t + fall.total_ms());
                log::debug!("Cup falling");
            }
            Task::FallComplete => {
                self.motion = MotionState::Fallen;
                self.changes |= ChangeFlags::MOTION;
                log::debug!("Cup has fallen");
            }
        }
    }

    fn evaluate_pour(&mut self, t: Millis) {
        let dragging = self.motion == MotionState::Dragging;
        match self.pour.evaluate(self.tilt.tilt(), dragging, self.level) {
            Some(PourTransition::Started) => {
                self.pour_task = Some(self.scheduler.schedule_every(
                    Task::PourTick,
                    t,
                    self.config.pour.cadence_ms,
                ));
                log::debug!("Pouring at {:.1}°", self.tilt.tilt());
            }
            Some(PourTransition::Stopped) => {
                self.cancel_pour_task();
                log::debug!("Pouring stopped, level {:.1}", self.level.get());
            }
            None => {}
        }
    }

    fn stop_pour(&mut self) {
        self.pour.stop();
        self.cancel_pour_task();
    }

    fn cancel_pour_task(&mut self) {
        if let Some(id) = self.pour_task.take() {
            self.scheduler.cancel(id);
        }
    }

    fn home(&self, viewport: &Viewport) -> Rect {
        home_rect(viewport, &self.config.dock)
    }

    /// Screen position of the rim corner on `side` for the cup as drawn now
    fn rim_point(&self, side: Side) -> Option<(f32, f32)> {
        let viewport = self.viewport?;
        let home = self.home(&viewport);
        let corner_x = match side {
            Side::Left => home.x,
            Side::Right => home.right(),
        };
        Some(Placement::new(self.cup_transform(), home).to_screen(corner_x, home.y))
    }

    fn emit_drop(&mut self, origin: (f32, f32), side: Side, t: Millis) {
        let spawn = DropSpawn::jittered(&mut self.rng, origin, side, &self.config.drops);
        let id = self.drops.emit(spawn, t);
        self.changes |= ChangeFlags::DROPS;
        log::trace!(
            "Drop {} at ({:.1}, {:.1}) vx {:.1}",
            id.get(),
            spawn.x,
            spawn.y,
            spawn.velocity_x
        );
    }

    fn step_steam(&mut self, now: Millis) {
        let interval = self.config.frame_interval_ms.max(1);
        let frames = now.saturating_sub(self.steam_clock) / interval;
        if frames == 0 {
            return;
        }
        let translate = self.cup_transform().translate;
        if !self.steam.is_visible() {
            self.steam_clock = now;
            self.steam_anchor = translate;
            return;
        }

        let simulated = frames.min(MAX_STEAM_FRAMES);
        let per_frame = (
            (translate.0 - self.steam_anchor.0) / simulated as f32,
            (translate.1 - self.steam_anchor.1) / simulated as f32,
        );
        for _ in 0..simulated {
            self.steam.update(per_frame, &mut self.rng);
        }
        self.steam_clock += frames * interval;
        self.steam_anchor = translate;
        self.changes |= ChangeFlags::DECOR;
    }

    fn is_animating(&self) -> bool {
        self.motion == MotionState::Dragging
            || !self.tilt.is_settled()
            || self.placement.is_animating()
            || !self.drops.is_empty()
            || (self.steam.is_visible() && self.viewport.is_some())
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    fn paint_cup(&self, ctx: &mut PaintContext, home: Rect) {
        let transform = self.cup_transform();
        let readout = self.tilt.readout();

        if self.steam.is_visible() {
            let rim = (
                home.x + home.width * 0.5 + transform.translate.0,
                home.y + transform.translate.1 - 4.0,
            );
            for particle in self.steam.particles() {
                let remaining = particle.remaining();
                ctx.draw_circle(
                    rim.0 + particle.x,
                    rim.1 + particle.y,
                    3.0 + (1.0 - remaining) * 4.0,
                    STEAM_COLOR.with_opacity(remaining),
                );
            }
        }

        ctx.push_transform(transform, home);

        // Handle first so the body overlaps its inner edge
        ctx.draw_rounded_rect(
            Rect::new(home.right() - 8.0, home.y + 18.0, 22.0, 36.0),
            CUP_COLOR,
            11.0,
        );
        ctx.draw_rounded_rect(home, CUP_COLOR, 10.0);

        let inner = Rect::new(
            home.x + 6.0,
            home.y + 8.0,
            home.width - 12.0,
            home.height - 14.0,
        );
        let fill = inner.height * self.level.get() / 100.0;
        if fill > 0.0 {
            let surface_y = inner.bottom() - fill;
            ctx.draw_rounded_rect(
                Rect::new(inner.x, surface_y, inner.width, fill),
                COFFEE_COLOR,
                6.0,
            );

            // The surface is drawn as beads along a line that stays level
            // in screen space while the cup turns
            let slope = readout.surface_angle.to_radians().tan();
            let centre_x = inner.x + inner.width * 0.5;
            for i in 0..=6 {
                let sx = inner.x + inner.width * i as f32 / 6.0;
                let sy = (surface_y + slope * (sx - centre_x)).clamp(inner.y, inner.bottom());
                let bead_x = (sx + readout.slosh).clamp(inner.x + 3.0, inner.right() - 3.0);
                ctx.draw_circle(bead_x, sy, 3.0, COFFEE_COLOR);
            }
        }

        ctx.draw_rect(Rect::new(home.x, home.y, home.width, 4.0), RIM_COLOR);
        ctx.pop_transform();
    }

    fn paint_drops(&self, ctx: &mut PaintContext, viewport: &Viewport, now: Millis) {
        let duration = self.config.drops.fall_duration_ms;
        for drop in self.drops.iter() {
            let frame = drop.frame_at(now, duration, viewport.height);
            if frame.opacity <= 0.0 || frame.scale <= 0.0 {
                continue;
            }
            ctx.draw_circle(
                frame.x,
                frame.y,
                drop.size * 0.5 * frame.scale,
                COFFEE_COLOR.with_opacity(frame.opacity),
            );
        }
    }
}

impl Widget for CupWidget {
    fn event(&mut self, event: &Event, now: Millis) -> EventResponse {
        match *event {
            Event::Resize { width, height } => {
                self.set_viewport(width, height);
                EventResponse::Handled
            }
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => self.pointer_down(x, y, now),
            Event::MouseMove { x, y } => self.pointer_move(x, y, now),
            Event::MouseUp {
                x,
                y,
                button: MouseButton::Left,
            } => self.pointer_up(x, y, now),
            Event::MouseLeave => match self.drag.map(|drag| drag.pointer) {
                Some((x, y)) => self.pointer_up(x, y, now),
                None => EventResponse::Ignored,
            },
            Event::MouseDown { .. } | Event::MouseUp { .. } => EventResponse::Ignored,
        }
    }

    fn advance(&mut self, now: Millis) -> bool {
        if !self.mounted {
            return false;
        }
        self.run_due(now);
        self.step_steam(now);
        self.is_animating()
    }

    fn next_deadline(&self) -> Option<Millis> {
        if !self.mounted {
            return None;
        }
        let frame = self
            .is_animating()
            .then(|| self.clock + self.config.frame_interval_ms.max(1));
        match (self.scheduler.next_deadline(), frame) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn paint(&self, ctx: &mut PaintContext, now: Millis) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let home = self.home(&viewport);

        if self.motion == MotionState::Fallen {
            let button = reset_button(&viewport, &self.config.dock);
            ctx.draw_rounded_rect(button, CUP_COLOR, 16.0);
            ctx.draw_text("Refill", button, LABEL_COLOR, 14.0);
        } else {
            self.paint_cup(ctx, home);
        }

        self.paint_drops(ctx, &viewport, now);
    }

    fn take_changes(&mut self) -> ChangeFlags {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 800.0;

    fn mounted() -> CupWidget {
        let mut cup = CupWidget::new(CupConfig::default());
        cup.set_viewport(WIDTH, HEIGHT);
        cup.mount(0);
        cup
    }

    fn grab_point(cup: &CupWidget) -> (f32, f32) {
        cup.cup_rect().map(|r| r.center()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cup = mounted();
        let state = cup.state();
        assert_eq!(state.coffee_level, 100.0);
        assert_eq!(state.tilt, 0.0);
        assert!(!state.is_dragging);
        assert!(!state.has_fallen);
        assert!(state.spill_drops.is_empty());
        assert_eq!(state.motion, MotionState::Docked);
        // Only the sweep runs while idle
        assert_eq!(cup.pending_tasks(), 1);
    }

    #[test]
    fn test_input_is_ignored_without_viewport_or_mount() {
        let mut cup = CupWidget::new(CupConfig::default());
        cup.mount(0);
        assert_eq!(cup.pointer_down(10.0, 10.0, 5), EventResponse::Ignored);
        assert!(cup.cup_rect().is_none());

        let mut cup = CupWidget::new(CupConfig::default());
        cup.set_viewport(WIDTH, HEIGHT);
        let (x, y) = grab_point(&cup);
        assert_eq!(cup.pointer_down(x, y, 5), EventResponse::Ignored);
    }

    #[test]
    fn test_press_outside_cup_is_ignored() {
        let mut cup = mounted();
        assert_eq!(cup.pointer_down(10.0, 700.0, 5), EventResponse::Ignored);
        assert_eq!(cup.motion(), MotionState::Docked);
    }

    #[test]
    fn test_drag_moves_cup_with_pointer() {
        let mut cup = mounted();
        let (x, y) = grab_point(&cup);
        assert_eq!(cup.pointer_down(x, y, 10), EventResponse::Handled);
        assert!(cup.state().is_dragging);

        cup.pointer_move(x - 10.0, y + 20.0, 26);
        let rect = cup.cup_rect().unwrap();
        assert_eq!(rect.center(), (x - 10.0, y + 20.0));
    }

    #[test]
    fn test_same_instant_moves_keep_sample_origin() {
        let mut cup = mounted();
        let (x, y) = grab_point(&cup);
        cup.pointer_down(x, y, 0);

        // Two moves at the same instant: only the pointer follows the second
        cup.pointer_move(x - 10.0, y, 10);
        cup.pointer_move(x - 20.0, y, 10);
        assert_eq!(cup.cup_rect().unwrap().center(), (x - 20.0, y));

        // Velocity over 10..20 is measured from the sample at 10ms
        cup.pointer_move(x - 30.0, y, 20);
        assert_eq!(cup.last_velocity_x, -2000.0);
    }

    #[test]
    fn test_still_samples_keep_throw_direction() {
        let mut cup = mounted();
        let (x, y) = grab_point(&cup);
        cup.pointer_down(x, y, 0);
        cup.pointer_move(x - 16.0, y, 16);
        cup.pointer_move(x - 16.0, y, 40);
        assert!(cup.last_velocity_x < 0.0);
    }

    #[test]
    fn test_unmount_cancels_timers() {
        let mut cup = mounted();
        cup.unmount();
        assert_eq!(cup.pending_tasks(), 0);
        assert_eq!(cup.next_deadline(), None);
        assert!(!cup.advance(10_000));
    }

    #[test]
    fn test_rim_point_follows_tilt_side() {
        let cup = mounted();
        let home = cup.cup_rect().unwrap();
        assert_eq!(cup.rim_point(Side::Left), Some((home.x, home.y)));
        assert_eq!(cup.rim_point(Side::Right), Some((home.right(), home.y)));
    }
}
