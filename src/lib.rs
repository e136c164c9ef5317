//! Trick or Treat - a grid arcade game
//!
//! Jack walks a tile board toward the candy corn while zombies, spiders and
//! ghosts roam the rows. Costumes picked up along the way let him smash rocks,
//! walk through lasers and slip past ghosts.
//!
//! Core modules:
//! - `sim`: Frame simulation (collisions, enemies, player, board, effects)
//! - `renderer`: Drawing surface abstraction and command recording
//! - `settings`: Session configuration
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board cell dimensions in pixels
    pub const CELL_WIDTH: f32 = 101.0;
    pub const CELL_HEIGHT: f32 = 83.0;
    /// Sprites are drawn this far above their row so they sit on the tile
    pub const SPRITE_Y_ADJUST: f32 = -20.0;
    /// Offset from the top of a cell to the vertical origin of effects
    pub const EFFECT_Y_ADJUST: f32 = SPRITE_Y_ADJUST + 70.0;

    /// Distance (cells) a zombie is pushed along its new heading after a bounce
    pub const BOUNCE_NUDGE: f32 = 0.1;

    /// Pickup bobbing amplitude (cells) and period control (ms per radian)
    pub const PICKUP_FLOAT_AMPLITUDE: f32 = 0.1;
    pub const PICKUP_FLOAT_PERIOD_MS: f32 = 800.0;

    /// Laser beam sweep period control (ms per radian)
    pub const LASER_SWEEP_PERIOD_MS: f32 = 50.0;
}

/// Top-left pixel origin for drawing a sprite at a (possibly fractional) cell
#[inline]
pub fn sprite_origin(location: Vec2) -> Vec2 {
    Vec2::new(
        location.x * consts::CELL_WIDTH,
        location.y * consts::CELL_HEIGHT + consts::SPRITE_Y_ADJUST,
    )
}

/// Pixel center of a cell, shifted down by `y_adjust`
#[inline]
pub fn cell_center(location: Vec2, y_adjust: f32) -> Vec2 {
    Vec2::new(
        (location.x + 0.5) * consts::CELL_WIDTH,
        (location.y + 0.5) * consts::CELL_HEIGHT + y_adjust,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_origin() {
        let origin = sprite_origin(Vec2::new(2.0, 1.0));
        assert_eq!(origin, Vec2::new(202.0, 63.0));
    }

    #[test]
    fn test_cell_center() {
        let center = cell_center(Vec2::ZERO, 0.0);
        assert_eq!(center, Vec2::new(50.5, 41.5));
    }
}
