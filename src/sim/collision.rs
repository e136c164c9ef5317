//! Collision detection between axis-aligned boxes
//!
//! Every collidable thing on the board presents one or more boxes in pixel
//! space. Overlap uses closed intervals, so boxes that merely touch collide.
//! Lasers are the odd one out: they present a box per emitter node and the
//! beam between the nodes is not part of the box test at all (the board guards
//! the beam with a cell range test instead).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Laser;

/// An axis-aligned box given by its size and center (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
}

impl CollisionBox {
    pub fn new(width: f32, height: f32, center: Vec2) -> Self {
        Self {
            width,
            height,
            center,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    /// Top-left corner (for drawing)
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn intersects(&self, other: &CollisionBox) -> bool {
        intersects(self, other)
    }
}

/// Closed-interval AABB overlap test
#[inline]
pub fn intersects(a: &CollisionBox, b: &CollisionBox) -> bool {
    a.left() <= b.right() && a.right() >= b.left() && a.top() <= b.bottom() && a.bottom() >= b.top()
}

/// True iff `entity` overlaps either of the laser's node boxes
pub fn entity_collides_with_laser(entity: &CollisionBox, laser: &Laser) -> bool {
    let [left, right] = laser.node_boxes();
    intersects(entity, &left) || intersects(entity, &right)
}
