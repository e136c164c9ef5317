//! In-memory render surface
//!
//! Records every drawing call instead of rasterizing it. Used by the headless
//! driver and by tests that assert on what a frame drew.

use glam::Vec2;

use super::{RenderSurface, Rgba, SpriteId};

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image { sprite: SpriteId, origin: Vec2 },
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    StrokeRect { origin: Vec2, size: Vec2, color: Rgba, line_width: f32 },
    FillArc { center: Vec2, radius: f32, start: f32, end: f32, color: Rgba },
    StrokeArc { center: Vec2, radius: f32, start: f32, end: f32, color: Rgba, line_width: f32 },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
}

/// Surface that appends every call to `commands`
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
    depth: usize,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands (start of a new frame)
    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Number of `Image` commands drawing `sprite`
    pub fn count_sprite(&self, sprite: SpriteId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { sprite: s, .. } if *s == sprite))
            .count()
    }

    /// True if every `save` has been matched by a `restore`
    pub fn is_balanced(&self) -> bool {
        self.depth == 0
    }
}

impl RenderSurface for CommandRecorder {
    fn draw_image(&mut self, sprite: SpriteId, origin: Vec2) {
        self.commands.push(DrawCommand::Image { sprite, origin });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            origin,
            size,
            color,
            line_width,
        });
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillArc {
            center,
            radius,
            start,
            end,
            color,
        });
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Rgba,
        line_width: f32,
    ) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            start,
            end,
            color,
            line_width,
        });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_balances() {
        let mut rec = CommandRecorder::new();
        rec.save();
        rec.draw_image(SpriteId::Player, Vec2::ZERO);
        assert!(!rec.is_balanced());
        rec.restore();
        assert!(rec.is_balanced());
        assert_eq!(rec.count_sprite(SpriteId::Player), 1);
        assert_eq!(rec.commands.len(), 3);

        rec.clear();
        assert!(rec.commands.is_empty());
    }
}
