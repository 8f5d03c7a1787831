pub mod cup;
pub mod widget;

pub use cup::{CupState, CupWidget, MotionState, PourState, SpillDrop};
pub use widget::{
    ChangeFlags, Color, Event, EventResponse, MouseButton, Rect, Viewport, Widget,
};
