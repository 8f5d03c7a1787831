//! Drives a [`CupWidget`] from a calloop event loop against the wall clock.
//!
//! Input arrives through a channel so any thread can feed pointer events.
//! A single timer source is armed for the widget's next deadline and
//! re-armed after every dispatch; none is registered while the widget is
//! idle.

use std::time::{Duration, Instant};

use calloop::channel::{self, Channel, Sender};
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, RegistrationToken};

use crate::config::CupConfig;
use crate::renderer::PaintContext;
use crate::schedule::Millis;
use crate::widgets::{CupWidget, Event, Widget};
use crate::{Error, Result};

struct HostState {
    cup: CupWidget,
    started: Instant,
    frame: PaintContext,
    frames_painted: u64,
    input_open: bool,
    /// Timer currently armed for the widget's next deadline
    armed: Option<(RegistrationToken, Millis)>,
}

impl HostState {
    fn now(&self) -> Millis {
        self.started.elapsed().as_millis() as Millis
    }

    fn deliver(&mut self, event: Event) {
        let now = self.now();
        self.cup.advance(now);
        self.cup.event(&event, now);
    }

    fn tick(&mut self) {
        let now = self.now();
        let animating = self.cup.advance(now);
        if self.cup.take_changes().needs_paint() || animating {
            self.frame.clear();
            self.cup.paint(&mut self.frame, now);
            self.frames_painted += 1;
        }
    }
}

pub struct CupHost {
    event_loop: EventLoop<'static, HostState>,
    state: HostState,
    sender: Sender<Event>,
}

impl CupHost {
    /// Create a host with a mounted cup on a `width` x `height` surface
    pub fn new(config: CupConfig, width: f32, height: f32) -> Result<Self> {
        let _ = env_logger::try_init();

        let event_loop: EventLoop<'static, HostState> = EventLoop::try_new()?;
        let (sender, input): (Sender<Event>, Channel<Event>) = channel::channel();

        event_loop
            .handle()
            .insert_source(input, |event, _, state: &mut HostState| match event {
                channel::Event::Msg(event) => state.deliver(event),
                channel::Event::Closed => {
                    log::info!("Input channel closed");
                    state.input_open = false;
                }
            })
            .map_err(|e| Error::Loop(e.error))?;

        let started = Instant::now();
        let mut cup = CupWidget::new(config);
        cup.set_viewport(width, height);
        cup.mount(0);

        log::info!("Cup host started on a {}x{} surface", width, height);

        let mut host = Self {
            event_loop,
            state: HostState {
                cup,
                started,
                frame: PaintContext::new(),
                frames_painted: 0,
                input_open: true,
                armed: None,
            },
            sender,
        };
        host.state.tick();
        host.rearm()?;
        Ok(host)
    }

    /// A handle for feeding input events, usable from other threads
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    pub fn cup(&self) -> &CupWidget {
        &self.state.cup
    }

    /// Display list of the most recent paint
    pub fn frame(&self) -> &PaintContext {
        &self.state.frame
    }

    pub fn frames_painted(&self) -> u64 {
        self.state.frames_painted
    }

    /// Milliseconds since the host started
    pub fn now(&self) -> Millis {
        self.state.now()
    }

    /// Wait for input or the next deadline, capped at `max_wait`, then
    /// advance, repaint and re-arm the timer.
    pub fn dispatch(&mut self, max_wait: Duration) -> Result<()> {
        self.event_loop.dispatch(Some(max_wait), &mut self.state)?;
        self.state.tick();
        self.rearm()
    }

    /// Point the timer source at the widget's next deadline
    fn rearm(&mut self) -> Result<()> {
        let next = self.state.cup.next_deadline();
        if let Some((token, at)) = self.state.armed {
            if next == Some(at) {
                return Ok(());
            }
            self.event_loop.handle().remove(token);
            self.state.armed = None;
        }

        let Some(at) = next else {
            log::trace!("Cup idle, no timer armed");
            return Ok(());
        };
        let timer = Timer::from_deadline(self.state.started + Duration::from_millis(at));
        let token = self
            .event_loop
            .handle()
            .insert_source(timer, |_, _, state: &mut HostState| {
                state.armed = None;
                state.tick();
                TimeoutAction::Drop
            })
            .map_err(|e| Error::Loop(e.error))?;
        self.state.armed = Some((token, at));
        Ok(())
    }

    /// Dispatch until `done` holds for the cup or `timeout` passes.
    /// Returns whether the condition was met.
    pub fn run_until<F>(&mut self, timeout: Duration, mut done: F) -> Result<bool>
    where
        F: FnMut(&CupWidget) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            if done(&self.state.cup) {
                return Ok(true);
            }
            let now = Instant::now();
            if now >= deadline || !self.state.input_open {
                return Ok(done(&self.state.cup));
            }
            self.dispatch(deadline - now)?;
        }
    }
}

impl Drop for CupHost {
    fn drop(&mut self) {
        self.state.cup.unmount();
    }
}
