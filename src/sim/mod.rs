//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Frame time only (no wall clock); timers run on accumulated `dt`
//! - Seeded RNG only
//! - Drawing goes through [`crate::renderer::RenderSurface`]; no pixels are owned here

pub mod animation;
pub mod autopilot;
pub mod collision;
pub mod color;
pub mod costume;
pub mod enemy;
pub mod grid;
pub mod level;
pub mod obstacle;
pub mod player;
pub mod session;
pub mod spawn;

pub use animation::{AnimationQueue, Effect, EffectId, EffectKind};
pub use collision::{CollisionBox, entity_collides_with_laser, intersects};
pub use color::Color;
pub use costume::{Costume, CostumeKind, CostumePickup, CostumeSet};
pub use enemy::{Axis, Enemy, EnemyContact, EnemyKind};
pub use grid::{Cell, Direction};
pub use level::{LevelMap, LevelTable, RowTile};
pub use obstacle::{Laser, Obstacle, Rock, RockStyle, Web};
pub use player::{Player, WebStatus};
pub use session::{DeathCause, GameEvent, GameSession, MoveOutcome, SessionState};
pub use spawn::SpawnScheduler;
