//! Costumes: pickups on the board and the set the player wears
//!
//! Each costume kind grants one capability:
//! - Dwarf: smash rocks of the dwarf's color
//! - LaserMan: walk through beams of the glasses' color
//! - Ghost: ghosts neither see nor harm the wearer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::grid::Cell;
use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::{RenderSurface, SpriteId};
use crate::sprite_origin;

/// Costume type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostumeKind {
    Dwarf,
    LaserMan,
    Ghost,
}

impl CostumeKind {
    fn slot(&self) -> usize {
        match self {
            CostumeKind::Dwarf => 0,
            CostumeKind::LaserMan => 1,
            CostumeKind::Ghost => 2,
        }
    }

    /// Headline for the first-pickup overlay
    pub fn title(&self) -> &'static str {
        match self {
            CostumeKind::Dwarf => "DWARF",
            CostumeKind::LaserMan => "LASERMAN",
            CostumeKind::Ghost => "GHOST",
        }
    }

    /// Caption for the first-pickup overlay
    pub fn caption(&self) -> &'static str {
        match self {
            CostumeKind::Dwarf => "Rocks were meant for smashing.",
            CostumeKind::LaserMan => "Lasers shmasers.",
            CostumeKind::Ghost => "100% Believeable.",
        }
    }
}

/// A wearable costume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Costume {
    Dwarf(Color),
    LaserMan(Color),
    Ghost,
}

impl Costume {
    pub fn dwarf(color: Color) -> Result<Self, ConfigError> {
        Self::checked(CostumeKind::Dwarf, color).map(Costume::Dwarf)
    }

    pub fn laser_man(color: Color) -> Result<Self, ConfigError> {
        Self::checked(CostumeKind::LaserMan, color).map(Costume::LaserMan)
    }

    fn checked(kind: CostumeKind, color: Color) -> Result<Color, ConfigError> {
        if color.is_vivid() {
            Ok(color)
        } else {
            Err(ConfigError::InvalidCostumeColor { kind, color })
        }
    }

    pub fn kind(&self) -> CostumeKind {
        match self {
            Costume::Dwarf(_) => CostumeKind::Dwarf,
            Costume::LaserMan(_) => CostumeKind::LaserMan,
            Costume::Ghost => CostumeKind::Ghost,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            Costume::Dwarf(c) => SpriteId::DwarfCostume(*c),
            Costume::LaserMan(c) => SpriteId::LaserManCostume(*c),
            Costume::Ghost => SpriteId::GhostCostume,
        }
    }
}

/// Costumes currently worn: at most one per kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostumeSet {
    slots: [Option<Costume>; 3],
}

impl CostumeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put on `costume`, returning any costume of the same kind it replaced
    pub fn wear(&mut self, costume: Costume) -> Option<Costume> {
        self.slots[costume.kind().slot()].replace(costume)
    }

    pub fn get(&self, kind: CostumeKind) -> Option<Costume> {
        self.slots[kind.slot()]
    }

    pub fn is_wearing(&self, kind: CostumeKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn clear(&mut self) {
        self.slots = [None; 3];
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Worn costumes in draw order (ghost sheet first, then dwarf, then glasses)
    pub fn iter(&self) -> impl Iterator<Item = Costume> + '_ {
        [CostumeKind::Ghost, CostumeKind::Dwarf, CostumeKind::LaserMan]
            .into_iter()
            .filter_map(|kind| self.get(kind))
    }
}

/// A costume lying on the board, bobbing about its cell
#[derive(Debug, Clone, PartialEq)]
pub struct CostumePickup {
    pub costume: Costume,
    /// Cell the pickup was placed on; pickups are matched against this
    pub origin: Cell,
    /// Current (floating) draw location
    pub location: Vec2,
    clock: f32,
}

impl CostumePickup {
    pub fn new(costume: Costume, origin: Cell) -> Self {
        Self {
            costume,
            origin,
            location: origin.as_vec2(),
            clock: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
        let dy = PICKUP_FLOAT_AMPLITUDE * (self.clock * 1000.0 / PICKUP_FLOAT_PERIOD_MS).sin();
        self.location.y = self.origin.y as f32 + dy;
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.draw_image(self.costume.sprite(), sprite_origin(self.location));
    }
}
