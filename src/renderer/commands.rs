//! Draw command definitions for the display list.

use crate::animation::Transform;
use crate::widgets::{Color, Rect};

/// A single draw operation in screen coordinates, before placement.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle with rounded corners
    RoundedRect {
        rect: Rect,
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
    },
    /// Filled circle
    Circle {
        center: (f32, f32),
        radius: f32,
        color: Color,
    },
    /// A text label. Rasterization skips these; hosts with a text stack
    /// draw them.
    Text {
        text: String,
        rect: Rect,
        color: Color,
        font_size: f32,
    },
}

impl DrawCommand {
    /// Axis-aligned bounds of the shape before placement
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::RoundedRect { rect, .. } | DrawCommand::Text { rect, .. } => *rect,
            DrawCommand::Circle { center, radius, .. } => Rect::new(
                center.0 - radius,
                center.1 - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::RoundedRect { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }

    /// Whether a point (in unplaced screen coordinates) lies inside the shape
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            DrawCommand::RoundedRect { rect, radius, .. } => {
                rounded_rect_contains(rect, *radius, x, y)
            }
            DrawCommand::Circle { center, radius, .. } => {
                let dx = x - center.0;
                let dy = y - center.1;
                dx * dx + dy * dy <= radius * radius
            }
            DrawCommand::Text { rect, .. } => rect.contains(x, y),
        }
    }
}

fn rounded_rect_contains(rect: &Rect, radius: f32, x: f32, y: f32) -> bool {
    if !rect.contains(x, y) {
        return false;
    }
    let r = radius.min(rect.width.min(rect.height) * 0.5).max(0.0);
    if r <= 0.0 {
        return true;
    }
    // Distance from the inner rectangle shrunk by the radius
    let cx = x.clamp(rect.x + r, rect.right() - r);
    let cy = y.clamp(rect.y + r, rect.bottom() - r);
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

/// A transform applied about the centre of `frame`, a screen-space box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub transform: Transform,
    pub frame: Rect,
}

impl Placement {
    pub fn new(transform: Transform, frame: Rect) -> Self {
        Self { transform, frame }
    }

    /// Map an unplaced screen point to where it is drawn
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        let (px, py) = self.transform.apply_to_point(
            x - self.frame.x,
            y - self.frame.y,
            self.frame.width,
            self.frame.height,
        );
        (px + self.frame.x, py + self.frame.y)
    }

    /// Map a drawn screen point back to unplaced coordinates
    pub fn from_screen(&self, x: f32, y: f32) -> (f32, f32) {
        let (px, py) = self.transform.unapply_point(
            x - self.frame.x,
            y - self.frame.y,
            self.frame.width,
            self.frame.height,
        );
        (px + self.frame.x, py + self.frame.y)
    }

    /// Axis-aligned screen bounds of `rect` after placement
    pub fn bounds_of(&self, rect: &Rect) -> Rect {
        let corners = [
            self.to_screen(rect.x, rect.y),
            self.to_screen(rect.right(), rect.y),
            self.to_screen(rect.x, rect.bottom()),
            self.to_screen(rect.right(), rect.bottom()),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// A command together with the placement active when it was recorded
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub command: DrawCommand,
    pub placement: Option<Placement>,
}

impl DrawItem {
    /// Screen-space bounds of the drawn shape
    pub fn screen_bounds(&self) -> Rect {
        let bounds = self.command.bounds();
        match &self.placement {
            Some(placement) => placement.bounds_of(&bounds),
            None => bounds,
        }
    }

    /// Hit test a screen point against the drawn shape
    pub fn hit(&self, x: f32, y: f32) -> bool {
        let (lx, ly) = match &self.placement {
            Some(placement) => placement.from_screen(x, y),
            None => (x, y),
        };
        self.command.contains(lx, ly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_corner_is_outside() {
        let cmd = DrawCommand::RoundedRect {
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            color: Color::BLACK,
            radius: 8.0,
        };
        assert!(!cmd.contains(0.5, 0.5));
        assert!(cmd.contains(10.0, 10.0));
        assert!(cmd.contains(0.5, 10.0));
    }

    #[test]
    fn test_placed_hit_follows_rotation() {
        // A tall thin bar turned a quarter turn becomes a wide one
        let frame = Rect::new(100.0, 100.0, 10.0, 40.0);
        let item = DrawItem {
            command: DrawCommand::RoundedRect {
                rect: frame,
                color: Color::WHITE,
                radius: 0.0,
            },
            placement: Some(Placement::new(Transform::rotate_degrees(90.0), frame)),
        };
        // Centre is (105, 120); the rotated bar spans x in [85, 125]
        assert!(item.hit(88.0, 120.0));
        assert!(!item.hit(105.0, 102.0));
        let bounds = item.screen_bounds();
        assert!((bounds.width - 40.0).abs() < 1e-3);
        assert!((bounds.height - 10.0).abs() < 1e-3);
    }
}
