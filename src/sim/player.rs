//! The player token
//!
//! Holds the worn costumes, the web-entrapment state and the handle of the
//! active laser shield effect. Board-dependent movement rules live on the
//! session; this module answers capability questions and runs the web gate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::EffectId;
use super::collision::CollisionBox;
use super::color::Color;
use super::costume::{Costume, CostumeKind, CostumeSet};
use super::grid::Cell;
use super::obstacle::Rock;
use crate::renderer::{RenderSurface, SpriteId};
use crate::{cell_center, sprite_origin};

const PLAYER_BOX: Vec2 = Vec2::new(60.0, 70.0);
const PLAYER_BOX_Y_ADJUST: f32 = 50.0;

/// Web entrapment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WebStatus {
    #[default]
    Free,
    /// Caught in a web; `attempted` is set once the first escape try is spent
    Trapped { attempted: bool },
}

/// What the web lets a move attempt do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebGate {
    /// Move proceeds to the occupancy gate
    Proceed,
    /// Move is swallowed; play the struggle effect
    Struggle,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub cell: Cell,
    pub costumes: CostumeSet,
    pub web: WebStatus,
    /// Looping shield effect shown after crossing a beam
    pub shield: Option<EffectId>,
}

impl Player {
    pub fn new(start: Cell) -> Self {
        Self {
            cell: start,
            costumes: CostumeSet::new(),
            web: WebStatus::Free,
            shield: None,
        }
    }

    /// Reposition for a level (re)start, shedding costumes and web.
    ///
    /// Returns the shield effect the caller must finish, if one was active.
    pub fn reset(&mut self, start: Cell) -> Option<EffectId> {
        self.cell = start;
        self.costumes.clear();
        self.web = WebStatus::Free;
        self.shield.take()
    }

    pub fn is_dwarf(&self) -> bool {
        self.costumes.is_wearing(CostumeKind::Dwarf)
    }

    pub fn is_ghost(&self) -> bool {
        self.costumes.is_wearing(CostumeKind::Ghost)
    }

    pub fn is_laser_man(&self) -> bool {
        self.costumes.is_wearing(CostumeKind::LaserMan)
    }

    /// A dwarf smashes plain rocks of its own color
    pub fn can_smash(&self, rock: &Rock) -> bool {
        match (self.costumes.get(CostumeKind::Dwarf), rock.color) {
            (Some(Costume::Dwarf(worn)), Some(color)) => worn == color,
            _ => false,
        }
    }

    /// Laserman glasses protect only against beams of the same color
    pub fn is_laser_immune(&self, beam: Color) -> bool {
        matches!(
            self.costumes.get(CostumeKind::LaserMan),
            Some(Costume::LaserMan(worn)) if worn == beam
        )
    }

    /// Run a move attempt through the web state machine
    pub fn attempt_move(&mut self) -> WebGate {
        match self.web {
            WebStatus::Free => WebGate::Proceed,
            WebStatus::Trapped { attempted: false } => {
                self.web = WebStatus::Trapped { attempted: true };
                WebGate::Struggle
            }
            WebStatus::Trapped { attempted: true } => {
                self.web = WebStatus::Free;
                WebGate::Proceed
            }
        }
    }

    /// Entering a web cell arms the trap
    pub fn catch_in_web(&mut self) {
        self.web = WebStatus::Trapped { attempted: false };
    }

    pub fn collision_box(&self) -> CollisionBox {
        CollisionBox::new(
            PLAYER_BOX.x,
            PLAYER_BOX.y,
            cell_center(self.cell.as_vec2(), PLAYER_BOX_Y_ADJUST),
        )
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let origin = sprite_origin(self.cell.as_vec2());
        surface.draw_image(SpriteId::Player, origin);
        for costume in self.costumes.iter() {
            surface.draw_image(costume.sprite(), origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;

    #[test]
    fn test_web_gate_needs_two_attempts() {
        let mut player = Player::new(Cell::new(0, 0));
        assert_eq!(player.attempt_move(), WebGate::Proceed);

        player.catch_in_web();
        assert_eq!(player.attempt_move(), WebGate::Struggle);
        assert_eq!(player.web, WebStatus::Trapped { attempted: true });
        assert_eq!(player.attempt_move(), WebGate::Proceed);
        assert_eq!(player.web, WebStatus::Free);
    }

    #[test]
    fn test_can_smash_matches_color() {
        let mut player = Player::new(Cell::new(0, 0));
        let red = Rock::new(Color::Red, Cell::new(1, 0));
        let blue = Rock::new(Color::Blue, Cell::new(2, 0));
        let skull = Rock::skull(Cell::new(3, 0));
        assert!(!player.can_smash(&red));

        player.costumes.wear(Costume::Dwarf(Color::Red));
        assert!(player.can_smash(&red));
        assert!(!player.can_smash(&blue));
        assert!(!player.can_smash(&skull));
    }

    #[test]
    fn test_laser_immunity_matches_color() {
        let mut player = Player::new(Cell::new(0, 0));
        assert!(!player.is_laser_immune(Color::Blue));
        player.costumes.wear(Costume::LaserMan(Color::Blue));
        assert!(player.is_laser_immune(Color::Blue));
        assert!(!player.is_laser_immune(Color::Red));
        assert!(player.is_laser_man());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut player = Player::new(Cell::new(0, 0));
        player.costumes.wear(Costume::Ghost);
        player.catch_in_web();
        player.shield = Some(7);

        let shield = player.reset(Cell::new(3, 3));
        assert_eq!(shield, Some(7));
        assert_eq!(player.cell, Cell::new(3, 3));
        assert!(!player.is_ghost());
        assert_eq!(player.web, WebStatus::Free);
        assert_eq!(player.shield, None);
    }

    #[test]
    fn test_render_draws_costume_overlays() {
        let mut player = Player::new(Cell::new(1, 1));
        player.costumes.wear(Costume::Ghost);
        player.costumes.wear(Costume::Dwarf(Color::Yellow));
        let mut rec = CommandRecorder::new();
        player.render(&mut rec);
        assert_eq!(rec.commands.len(), 3);
        assert_eq!(rec.count_sprite(SpriteId::GhostCostume), 1);
        assert_eq!(rec.count_sprite(SpriteId::DwarfCostume(Color::Yellow)), 1);
    }
}
