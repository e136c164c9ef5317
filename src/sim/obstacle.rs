//! Static board fixtures: rocks, webs and lasers
//!
//! Rocks and webs sit on a single cell. A laser is strung between two nodes on
//! one row: the node cells are walls, the cells strictly between them are the
//! beam.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionBox, entity_collides_with_laser};
use super::color::Color;
use super::grid::Cell;
use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::{RenderSurface, SpriteId, colors};
use crate::{cell_center, sprite_origin};

/// Vertical offset of a rock's collision box from its cell center
pub const ROCK_Y_ADJUST: f32 = 50.0;
/// Vertical offset of laser node boxes (and the beam) from the cell center
pub const LASER_NODE_Y_ADJUST: f32 = SPRITE_Y_ADJUST + 110.0 - CELL_HEIGHT / 2.0;
/// Laser node sprites sit a little lower than other sprites
const LASER_NODE_SPRITE_ADJUST: f32 = SPRITE_Y_ADJUST + 25.0;

const ROCK_BOX: Vec2 = Vec2::new(85.0, 77.0);
const JACK_O_LANTERN_BOX: Vec2 = Vec2::new(95.0, 77.0);
const LASER_NODE_BOX: Vec2 = Vec2::new(85.0, 50.0);
const LASER_BEAM_SIZE: Vec2 = Vec2::new(0.7 * CELL_WIDTH, 10.0);

/// Rock appearance; only plain rocks carry a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RockStyle {
    Plain,
    JackOLantern,
    Skull,
}

/// An impassable block, smashable by a dwarf of the same color
#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub style: RockStyle,
    /// None for decorative rocks, which can never be smashed
    pub color: Option<Color>,
    pub cell: Cell,
}

impl Rock {
    pub fn new(color: Color, cell: Cell) -> Self {
        Self {
            style: RockStyle::Plain,
            color: Some(color),
            cell,
        }
    }

    pub fn jack_o_lantern(cell: Cell) -> Self {
        Self {
            style: RockStyle::JackOLantern,
            color: None,
            cell,
        }
    }

    pub fn skull(cell: Cell) -> Self {
        Self {
            style: RockStyle::Skull,
            color: None,
            cell,
        }
    }

    pub fn collision_box(&self) -> CollisionBox {
        let size = match self.style {
            RockStyle::JackOLantern => JACK_O_LANTERN_BOX,
            RockStyle::Plain | RockStyle::Skull => ROCK_BOX,
        };
        CollisionBox::new(
            size.x,
            size.y,
            cell_center(self.cell.as_vec2(), ROCK_Y_ADJUST),
        )
    }

    pub fn sprite(&self) -> SpriteId {
        match (self.style, self.color) {
            (RockStyle::JackOLantern, _) => SpriteId::JackOLantern,
            (RockStyle::Skull, _) => SpriteId::Skull,
            (RockStyle::Plain, Some(color)) => SpriteId::Rock(color),
            (RockStyle::Plain, None) => SpriteId::Rock(Color::Gray),
        }
    }
}

/// A sticky web; entering it traps the player for one move
#[derive(Debug, Clone, PartialEq)]
pub struct Web {
    pub cell: Cell,
}

/// A horizontal beam between two emitter nodes on the same row
#[derive(Debug, Clone, PartialEq)]
pub struct Laser {
    pub color: Color,
    /// Column of the left node
    pub left: i32,
    /// Column of the right node
    pub right: i32,
    pub row: i32,
    /// Seconds since the laser was placed (drives the beam sweep)
    beam_clock: f32,
}

impl Laser {
    pub fn new(color: Color, left: i32, right: i32, row: i32) -> Result<Self, ConfigError> {
        if !color.is_vivid() {
            return Err(ConfigError::InvalidBeamColor(color));
        }
        if left >= right {
            return Err(ConfigError::InvalidLaserSpan { left, right });
        }
        Ok(Self {
            color,
            left,
            right,
            row,
            beam_clock: 0.0,
        })
    }

    /// Build a laser from two node cells, which must share a row
    pub fn from_nodes(color: Color, left: Cell, right: Cell) -> Result<Self, ConfigError> {
        if left.y != right.y {
            return Err(ConfigError::LaserNodesNotCoRow {
                left_row: left.y,
                right_row: right.y,
            });
        }
        Self::new(color, left.x, right.x, left.y)
    }

    pub fn left_node(&self) -> Cell {
        Cell::new(self.left, self.row)
    }

    pub fn right_node(&self) -> Cell {
        Cell::new(self.right, self.row)
    }

    /// True if `cell` is one of the emitter nodes
    pub fn is_node(&self, cell: Cell) -> bool {
        cell == self.left_node() || cell == self.right_node()
    }

    /// Open-interval test: is (x, y) strictly between the nodes on this row?
    pub fn beam_covers(&self, x: i32, y: i32) -> bool {
        y == self.row && x > self.left && x < self.right
    }

    /// Collision boxes around the left and right nodes
    pub fn node_boxes(&self) -> [CollisionBox; 2] {
        let node_box = |col: i32| {
            CollisionBox::new(
                LASER_NODE_BOX.x,
                LASER_NODE_BOX.y,
                cell_center(Vec2::new(col as f32, self.row as f32), LASER_NODE_Y_ADJUST),
            )
        };
        [node_box(self.left), node_box(self.right)]
    }

    /// Center of the sweeping beam particle (pixels)
    pub fn beam_center(&self) -> Vec2 {
        let row = self.row as f32;
        let min_x = cell_center(Vec2::new(self.left as f32, row), 0.0).x;
        let max_x = cell_center(Vec2::new(self.right as f32, row), 0.0).x;
        let phase = self.beam_clock * 1000.0 / LASER_SWEEP_PERIOD_MS;
        let dx = ((max_x - min_x) * phase.sin()).abs();
        Vec2::new(
            min_x + dx,
            cell_center(Vec2::new(0.0, row), LASER_NODE_Y_ADJUST).y,
        )
    }

    pub fn update(&mut self, dt: f32) {
        self.beam_clock += dt;
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.save();
        let center = self.beam_center();
        surface.fill_rect(
            center - LASER_BEAM_SIZE / 2.0,
            LASER_BEAM_SIZE,
            colors::highlight(self.color),
        );
        surface.restore();

        let y = self.row as f32 * CELL_HEIGHT + LASER_NODE_SPRITE_ADJUST;
        surface.draw_image(
            SpriteId::LaserNodeLeft,
            Vec2::new(self.left as f32 * CELL_WIDTH, y),
        );
        surface.draw_image(
            SpriteId::LaserNodeRight,
            Vec2::new(self.right as f32 * CELL_WIDTH, y),
        );
    }
}

/// A board fixture
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    Rock(Rock),
    Web(Web),
    Laser(Laser),
}

impl Obstacle {
    /// Does the player interact with this obstacle on entering `cell`?
    ///
    /// Rocks and webs match their own cell; lasers match the open beam range.
    pub fn interacts_at(&self, cell: Cell) -> bool {
        match self {
            Obstacle::Rock(rock) => rock.cell == cell,
            Obstacle::Web(web) => web.cell == cell,
            Obstacle::Laser(laser) => laser.beam_covers(cell.x, cell.y),
        }
    }

    /// Box test against a moving entity. Webs never collide.
    pub fn collides_with(&self, entity: &CollisionBox) -> bool {
        match self {
            Obstacle::Rock(rock) => rock.collision_box().intersects(entity),
            Obstacle::Web(_) => false,
            Obstacle::Laser(laser) => entity_collides_with_laser(entity, laser),
        }
    }

    /// All collision boxes this obstacle presents
    pub fn collision_boxes(&self) -> Vec<CollisionBox> {
        match self {
            Obstacle::Rock(rock) => vec![rock.collision_box()],
            Obstacle::Web(_) => Vec::new(),
            Obstacle::Laser(laser) => laser.node_boxes().to_vec(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Obstacle::Laser(laser) = self {
            laser.update(dt);
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        match self {
            Obstacle::Rock(rock) => surface.draw_image(rock.sprite(), sprite_origin(rock.cell.as_vec2())),
            Obstacle::Web(web) => surface.draw_image(SpriteId::Web, sprite_origin(web.cell.as_vec2())),
            Obstacle::Laser(laser) => laser.render(surface),
        }
    }
}
