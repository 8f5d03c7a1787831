//! A draggable coffee cup widget.
//!
//! The cup tilts with horizontal pointer motion, pours drops when tilted far
//! enough, docks when released near home and spills then falls when released
//! anywhere else. All behavior runs against an explicit millisecond clock so
//! it can be driven by a real event loop ([`host::CupHost`]) or stepped
//! deterministically in tests.

pub mod animation;
pub mod config;
pub mod error;
pub mod host;
pub mod renderer;
pub mod schedule;
pub mod widgets;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{Easing, Transform, Transition};
    pub use crate::config::{CupConfig, DockConfig, DropConfig, PourConfig, SteamConfig, TiltConfig};
    pub use crate::host::CupHost;
    pub use crate::renderer::PaintContext;
    pub use crate::schedule::Millis;
    pub use crate::widgets::{
        ChangeFlags, Color, CupState, CupWidget, Event, EventResponse, MotionState, MouseButton,
        PourState, Rect, SpillDrop, Viewport, Widget,
    };
}
