//! Rendering interface
//!
//! The simulation issues drawing commands to a [`RenderSurface`] but owns no
//! pixels itself. Sprites are named by [`SpriteId`]; the surface resolves them
//! through whatever (synchronous, cached) image provider it wraps.

pub mod colors;
pub mod recorder;

use glam::Vec2;

pub use colors::Rgba;
pub use recorder::{CommandRecorder, DrawCommand};

use crate::sim::color::Color;
use crate::sim::level::RowTile;

/// A 2D drawing context (canvas-style)
pub trait RenderSurface {
    /// Blit a sprite with its top-left corner at `origin`
    fn draw_image(&mut self, sprite: SpriteId, origin: Vec2);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba, line_width: f32);
    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Rgba);
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Rgba,
        line_width: f32,
    );
    /// Push the current transform
    fn save(&mut self);
    /// Pop the transform pushed by the matching `save`
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
}

/// Sprite identifiers understood by the image provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Zombie,
    Spider,
    Ghost,
    /// Ghost that has spotted the player
    GhostAlert,
    Rock(Color),
    JackOLantern,
    Skull,
    Web,
    LaserNodeLeft,
    LaserNodeRight,
    DwarfCostume(Color),
    LaserManCostume(Color),
    GhostCostume,
    Candy,
    Tile(RowTile),
}
