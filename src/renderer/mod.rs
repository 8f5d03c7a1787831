pub mod commands;
pub mod raster;

pub use commands::{DrawCommand, DrawItem, Placement};

use crate::animation::Transform;
use crate::widgets::{Color, Rect};

/// Records draw commands for one frame.
///
/// Shapes are recorded in painter's order. A placement pushed with
/// [`PaintContext::push_transform`] applies to everything recorded until the
/// matching pop; nested pushes replace the outer placement.
#[derive(Debug, Default)]
pub struct PaintContext {
    items: Vec<DrawItem>,
    transform_stack: Vec<Placement>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all buffers for reuse, preserving allocated capacity
    pub fn clear(&mut self) {
        self.items.clear();
        self.transform_stack.clear();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rounded_rect(rect, color, 0.0);
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.record(DrawCommand::RoundedRect {
            rect,
            color,
            radius,
        });
    }

    pub fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.record(DrawCommand::Circle {
            center: (cx, cy),
            radius,
            color,
        });
    }

    pub fn draw_text(&mut self, text: &str, rect: Rect, color: Color, font_size: f32) {
        self.record(DrawCommand::Text {
            text: text.to_string(),
            rect,
            color,
            font_size,
        });
    }

    /// Apply `transform` about the centre of `frame` to subsequent commands
    pub fn push_transform(&mut self, transform: Transform, frame: Rect) {
        self.transform_stack.push(Placement::new(transform, frame));
    }

    pub fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }

    pub fn current_placement(&self) -> Option<Placement> {
        self.transform_stack.last().copied()
    }

    fn record(&mut self, command: DrawCommand) {
        // Fully transparent shapes are dropped at record time
        if command.color().a <= 0.0 {
            return;
        }
        let placement = self
            .current_placement()
            .filter(|placement| !placement.transform.is_identity());
        self.items.push(DrawItem { command, placement });
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_shapes_are_skipped() {
        let mut ctx = PaintContext::new();
        ctx.draw_circle(0.0, 0.0, 4.0, Color::TRANSPARENT);
        ctx.draw_circle(0.0, 0.0, 4.0, Color::WHITE);
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_placement_scoped_to_push_pop() {
        let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut ctx = PaintContext::new();
        ctx.push_transform(Transform::translate(5.0, 0.0), frame);
        ctx.draw_rect(frame, Color::WHITE);
        ctx.pop_transform();
        ctx.draw_rect(frame, Color::BLACK);

        assert!(ctx.items()[0].placement.is_some());
        assert!(ctx.items()[1].placement.is_none());
        // Only the moved rect covers (12, 2)
        assert!(ctx.items()[0].hit(12.0, 2.0));
        assert!(!ctx.items()[1].hit(12.0, 2.0));
    }
}
