//! Enemy behavior
//!
//! Three kinds share one update/collision contract:
//! - Zombie: patrols its lane and bounces off rocks and laser nodes
//! - Spider: oscillates within a closed range, pausing at each end
//! - Ghost: drifts along its row and charges when it sees the player
//!
//! `update` only moves the enemy. Collisions are checked by a separate
//! `check_collisions` call made once per frame by the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::CollisionBox;
use super::obstacle::Obstacle;
use super::player::Player;
use crate::consts::BOUNCE_NUDGE;
use crate::renderer::{RenderSurface, SpriteId};
use crate::{cell_center, sprite_origin};

/// Enemy type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Zombie,
    Spider,
    Ghost,
}

impl EnemyKind {
    /// Collision box size and vertical offset from the cell center
    fn box_geometry(&self) -> (Vec2, f32) {
        match self {
            EnemyKind::Zombie => (Vec2::new(70.0, 60.0), 50.0),
            EnemyKind::Spider => (Vec2::new(60.0, 50.0), 50.0),
            EnemyKind::Ghost => (Vec2::new(70.0, 66.0), 45.0),
        }
    }
}

/// Axis an enemy travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Spider state between range bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpiderPhase {
    Moving,
    /// Stopped at a bound; resumes at `resume_speed` once `remaining` runs out
    Paused { remaining: f32, resume_speed: f32 },
}

/// Kind-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Zombie,
    Spider {
        min: f32,
        max: f32,
        /// Seconds spent paused at each bound
        pause: f32,
        phase: SpiderPhase,
    },
    Ghost {
        /// Cruising speed (signed)
        base_speed: f32,
        /// Speed multiplier while the player is in sight
        attack_factor: f32,
        alert: bool,
    },
}

/// Result of an enemy's collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    None,
    /// Hit an obstacle (zombies have already bounced)
    Obstacle,
    /// Caught the player
    Player,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Grid location; fractional while crossing cells
    pub location: Vec2,
    pub axis: Axis,
    /// Signed speed in cells per second; positive is right/down
    pub current_speed: f32,
    pub behavior: Behavior,
    pub collision_box: CollisionBox,
}

impl Enemy {
    fn with_behavior(id: u32, location: Vec2, axis: Axis, speed: f32, behavior: Behavior) -> Self {
        let mut enemy = Self {
            id,
            location,
            axis,
            current_speed: speed,
            behavior,
            collision_box: CollisionBox::new(0.0, 0.0, Vec2::ZERO),
        };
        enemy.refresh_collision_box();
        enemy
    }

    pub fn zombie(id: u32, location: Vec2, axis: Axis, speed: f32) -> Self {
        Self::with_behavior(id, location, axis, speed, Behavior::Zombie)
    }

    /// A spider oscillating over `[min, max]` along `axis`
    pub fn spider(
        id: u32,
        location: Vec2,
        axis: Axis,
        speed: f32,
        (min, max): (f32, f32),
        pause: f32,
    ) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self::with_behavior(
            id,
            location,
            axis,
            speed,
            Behavior::Spider {
                min,
                max,
                pause: pause.max(0.0),
                phase: SpiderPhase::Moving,
            },
        )
    }

    /// Ghosts only travel along rows
    pub fn ghost(id: u32, location: Vec2, speed: f32, attack_factor: f32) -> Self {
        Self::with_behavior(
            id,
            location,
            Axis::Horizontal,
            speed,
            Behavior::Ghost {
                base_speed: speed,
                attack_factor,
                alert: false,
            },
        )
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            Behavior::Zombie => EnemyKind::Zombie,
            Behavior::Spider { .. } => EnemyKind::Spider,
            Behavior::Ghost { .. } => EnemyKind::Ghost,
        }
    }

    /// Position along the travel axis
    fn axis_position(&self) -> f32 {
        match self.axis {
            Axis::Horizontal => self.location.x,
            Axis::Vertical => self.location.y,
        }
    }

    fn set_axis_position(&mut self, value: f32) {
        match self.axis {
            Axis::Horizontal => self.location.x = value,
            Axis::Vertical => self.location.y = value,
        }
    }

    fn refresh_collision_box(&mut self) {
        let (size, y_adjust) = self.kind().box_geometry();
        self.collision_box = CollisionBox::new(size.x, size.y, cell_center(self.location, y_adjust));
    }

    /// Ghost line of sight: same row, no ghost costume, ahead of the ghost
    pub fn sees(&self, player: &Player) -> bool {
        let Behavior::Ghost { base_speed, .. } = self.behavior else {
            return false;
        };
        if player.is_ghost() || self.location.y.round() as i32 != player.cell.y {
            return false;
        }
        let heading = if self.current_speed != 0.0 {
            self.current_speed
        } else {
            base_speed
        };
        let player_x = player.cell.x as f32;
        (heading > 0.0 && player_x > self.location.x) || (heading < 0.0 && player_x < self.location.x)
    }

    /// Advance along the travel axis and recompute the collision box
    pub fn update(&mut self, dt: f32, player: &Player) {
        match self.behavior {
            Behavior::Zombie => self.advance(dt),
            Behavior::Spider {
                min,
                max,
                pause,
                phase,
            } => self.step_spider(dt, (min, max), pause, phase),
            Behavior::Ghost {
                base_speed,
                attack_factor,
                ..
            } => {
                let sees_player = self.sees(player);
                let heading = if self.current_speed != 0.0 {
                    self.current_speed.signum()
                } else {
                    base_speed.signum()
                };
                let magnitude = if sees_player {
                    base_speed.abs() * attack_factor
                } else {
                    base_speed.abs()
                };
                self.current_speed = heading * magnitude;
                if let Behavior::Ghost { alert, .. } = &mut self.behavior {
                    *alert = sees_player;
                }
                self.advance(dt);
            }
        }
        self.refresh_collision_box();
    }

    fn advance(&mut self, dt: f32) {
        let pos = self.axis_position() + self.current_speed * dt;
        self.set_axis_position(pos);
    }

    fn step_spider(&mut self, dt: f32, (min, max): (f32, f32), pause: f32, phase: SpiderPhase) {
        let next_phase = match phase {
            SpiderPhase::Moving => {
                let pos = self.axis_position() + self.current_speed * dt;
                let bound = if self.current_speed > 0.0 && pos >= max {
                    Some(max)
                } else if self.current_speed < 0.0 && pos <= min {
                    Some(min)
                } else {
                    None
                };
                match bound {
                    Some(bound) => {
                        let resume_speed = -self.current_speed;
                        self.current_speed = 0.0;
                        self.set_axis_position(bound);
                        SpiderPhase::Paused {
                            remaining: pause,
                            resume_speed,
                        }
                    }
                    None => {
                        self.set_axis_position(pos);
                        SpiderPhase::Moving
                    }
                }
            }
            SpiderPhase::Paused {
                remaining,
                resume_speed,
            } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.current_speed = resume_speed;
                    SpiderPhase::Moving
                } else {
                    SpiderPhase::Paused {
                        remaining,
                        resume_speed,
                    }
                }
            }
        };
        if let Behavior::Spider { phase, .. } = &mut self.behavior {
            *phase = next_phase;
        }
    }

    /// Test against non-web obstacles and the player, reacting per kind
    pub fn check_collisions(&mut self, obstacles: &[Obstacle], player: &Player) -> EnemyContact {
        match self.behavior {
            Behavior::Zombie => {
                if self.collision_box.intersects(&player.collision_box()) {
                    return EnemyContact::Player;
                }
                if obstacles.iter().any(|o| o.collides_with(&self.collision_box)) {
                    self.bounce();
                    return EnemyContact::Obstacle;
                }
                EnemyContact::None
            }
            Behavior::Spider { .. } => {
                if self.collision_box.intersects(&player.collision_box()) {
                    EnemyContact::Player
                } else {
                    EnemyContact::None
                }
            }
            Behavior::Ghost { .. } => {
                // A ghost-costumed player is invisible to ghosts
                if !player.is_ghost() && self.collision_box.intersects(&player.collision_box()) {
                    EnemyContact::Player
                } else {
                    EnemyContact::None
                }
            }
        }
    }

    /// Reverse and step clear so the same hit doesn't fire next frame
    fn bounce(&mut self) {
        self.current_speed = -self.current_speed;
        let nudge = BOUNCE_NUDGE * self.current_speed.signum();
        let pos = self.axis_position() + nudge;
        self.set_axis_position(pos);
        self.refresh_collision_box();
    }

    /// Beyond `[-1, cols] x [-1, rows]`
    pub fn is_out_of_bounds(&self, cols: u32, rows: u32) -> bool {
        let Vec2 { x, y } = self.location;
        x < -1.0 || x > cols as f32 || y < -1.0 || y > rows as f32
    }

    pub fn sprite(&self) -> SpriteId {
        match self.behavior {
            Behavior::Zombie => SpriteId::Zombie,
            Behavior::Spider { .. } => SpriteId::Spider,
            Behavior::Ghost { alert: true, .. } => SpriteId::GhostAlert,
            Behavior::Ghost { alert: false, .. } => SpriteId::Ghost,
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.draw_image(self.sprite(), sprite_origin(self.location));
    }
}
