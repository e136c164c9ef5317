//! Level maps and the level table
//!
//! A [`LevelMap`] is static data: board size, start and finish cells, row art,
//! obstacle and costume placements, and the enemy recipe. The session builds a
//! working copy of the obstacles and costumes each time a level begins.

mod builtin;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::costume::{Costume, CostumePickup};
use super::enemy::{Axis, Enemy, EnemyKind};
use super::grid::Cell;
use super::obstacle::{Laser, Obstacle, Rock, Web};
use crate::error::ConfigError;

/// Row art
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTile {
    Water,
    Stone,
    Grass,
}

/// Obstacle placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObstacleSpec {
    Rock { color: Color, x: i32, y: i32 },
    JackOLantern { x: i32, y: i32 },
    Skull { x: i32, y: i32 },
    Web { x: i32, y: i32 },
    Laser { color: Color, left: i32, right: i32, row: i32 },
}

impl ObstacleSpec {
    pub fn build(&self) -> Result<Obstacle, ConfigError> {
        Ok(match *self {
            ObstacleSpec::Rock { color, x, y } => Obstacle::Rock(Rock::new(color, Cell::new(x, y))),
            ObstacleSpec::JackOLantern { x, y } => Obstacle::Rock(Rock::jack_o_lantern(Cell::new(x, y))),
            ObstacleSpec::Skull { x, y } => Obstacle::Rock(Rock::skull(Cell::new(x, y))),
            ObstacleSpec::Web { x, y } => Obstacle::Web(Web { cell: Cell::new(x, y) }),
            ObstacleSpec::Laser {
                color,
                left,
                right,
                row,
            } => Obstacle::Laser(Laser::new(color, left, right, row)?),
        })
    }
}

/// Costume placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CostumeSpec {
    Dwarf { color: Color, x: i32, y: i32 },
    LaserMan { color: Color, x: i32, y: i32 },
    Ghost { x: i32, y: i32 },
}

impl CostumeSpec {
    pub fn build(&self) -> Result<CostumePickup, ConfigError> {
        let (costume, x, y) = match *self {
            CostumeSpec::Dwarf { color, x, y } => (Costume::dwarf(color)?, x, y),
            CostumeSpec::LaserMan { color, x, y } => (Costume::laser_man(color)?, x, y),
            CostumeSpec::Ghost { x, y } => (Costume::Ghost, x, y),
        };
        Ok(CostumePickup::new(costume, Cell::new(x, y)))
    }
}

fn default_attack_factor() -> f32 {
    2.5
}

/// Ghosts must speed up when they spot the player
fn check_attack_factor(attack_factor: f32) -> Result<(), ConfigError> {
    if attack_factor > 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidAttackFactor(attack_factor))
    }
}

/// An enemy present when the level begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemySpec {
    Zombie {
        x: f32,
        y: f32,
        #[serde(default)]
        axis: Axis,
        speed: f32,
    },
    Spider {
        x: f32,
        y: f32,
        #[serde(default)]
        axis: Axis,
        speed: f32,
        min: f32,
        max: f32,
        #[serde(default)]
        pause: f32,
    },
    Ghost {
        x: f32,
        y: f32,
        speed: f32,
        #[serde(default = "default_attack_factor")]
        attack_factor: f32,
    },
}

impl EnemySpec {
    pub fn kind(&self) -> EnemyKind {
        match self {
            EnemySpec::Zombie { .. } => EnemyKind::Zombie,
            EnemySpec::Spider { .. } => EnemyKind::Spider,
            EnemySpec::Ghost { .. } => EnemyKind::Ghost,
        }
    }

    pub fn build(&self, id: u32) -> Result<Enemy, ConfigError> {
        Ok(match *self {
            EnemySpec::Zombie { x, y, axis, speed } => Enemy::zombie(id, Vec2::new(x, y), axis, speed),
            EnemySpec::Spider {
                x,
                y,
                axis,
                speed,
                min,
                max,
                pause,
            } => Enemy::spider(id, Vec2::new(x, y), axis, speed, (min, max), pause),
            EnemySpec::Ghost {
                x,
                y,
                speed,
                attack_factor,
            } => {
                check_attack_factor(attack_factor)?;
                Enemy::ghost(id, Vec2::new(x, y), speed, attack_factor)
            }
        })
    }
}

/// Board edge a spawned enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnSide {
    /// Left or top edge, heading right or down
    #[default]
    Start,
    /// Right or bottom edge, heading left or up
    End,
    /// Either edge, picked at random per spawn
    Either,
}

/// A recurring spawn: every `interval` seconds one enemy with randomized
/// lane and speed enters the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub interval: f32,
    pub kind: EnemyKind,
    #[serde(default)]
    pub axis: Axis,
    /// Rows for horizontal travel, columns for vertical
    pub lanes: Vec<i32>,
    pub min_speed: f32,
    pub max_speed: f32,
    #[serde(default)]
    pub side: SpawnSide,
    #[serde(default = "default_attack_factor")]
    pub attack_factor: f32,
    /// Spider pause at each bound
    #[serde(default)]
    pub pause: f32,
}

impl SpawnRule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kind == EnemyKind::Ghost && self.axis == Axis::Vertical {
            return Err(ConfigError::InvalidSpawnLane { kind: self.kind });
        }
        if self.kind == EnemyKind::Ghost {
            check_attack_factor(self.attack_factor)?;
        }
        if !(self.interval > 0.0) {
            return Err(ConfigError::Malformed(format!(
                "spawn interval must be positive, got {}",
                self.interval
            )));
        }
        if self.lanes.is_empty() {
            return Err(ConfigError::Malformed("spawn rule has no lanes".into()));
        }
        if self.min_speed > self.max_speed || self.min_speed < 0.0 {
            return Err(ConfigError::Malformed(format!(
                "bad spawn speed range {}..{}",
                self.min_speed, self.max_speed
            )));
        }
        Ok(())
    }
}

/// Enemies a level starts with plus its recurring spawns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelRecipe {
    #[serde(default)]
    pub initial: Vec<EnemySpec>,
    #[serde(default)]
    pub spawns: Vec<SpawnRule>,
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelMap {
    pub num_cols: u32,
    pub num_rows: u32,
    pub player_start: Cell,
    pub player_finish: Cell,
    /// One tile per row, top to bottom
    pub row_layout: Vec<RowTile>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub costumes: Vec<CostumeSpec>,
    #[serde(default)]
    pub recipe: LevelRecipe,
}

impl LevelMap {
    /// Check the board itself: size, row art, start and finish cells
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_cols == 0 || self.num_rows == 0 || self.row_layout.len() != self.num_rows as usize {
            return Err(ConfigError::InvalidBoard {
                cols: self.num_cols,
                rows: self.num_rows,
                row_tiles: self.row_layout.len(),
            });
        }
        for (name, cell) in [("start", self.player_start), ("finish", self.player_finish)] {
            if !cell.within(self.num_cols, self.num_rows) {
                return Err(ConfigError::Malformed(format!(
                    "player {} ({}, {}) is off the board",
                    name, cell.x, cell.y
                )));
            }
        }
        Ok(())
    }

    /// Every placement or recipe entry that will be skipped when the level is built
    pub fn problems(&self) -> Vec<ConfigError> {
        let obstacles = self.obstacles.iter().filter_map(|spec| spec.build().err());
        let costumes = self.costumes.iter().filter_map(|spec| spec.build().err());
        let enemies = self.recipe.initial.iter().filter_map(|spec| spec.build(0).err());
        let spawns = self.recipe.spawns.iter().filter_map(|rule| rule.validate().err());
        obstacles.chain(costumes).chain(enemies).chain(spawns).collect()
    }

    /// Working copy of the obstacle layout; invalid entries are logged and skipped
    pub fn build_obstacles(&self) -> Vec<Obstacle> {
        self.obstacles
            .iter()
            .filter_map(|spec| match spec.build() {
                Ok(obstacle) => Some(obstacle),
                Err(e) => {
                    log::warn!("skipping obstacle {:?}: {}", spec, e);
                    None
                }
            })
            .collect()
    }

    /// Starting enemies, numbered from `next_id`; invalid entries are logged and skipped
    pub fn build_enemies(&self, next_id: &mut u32) -> Vec<Enemy> {
        let mut enemies = Vec::with_capacity(self.recipe.initial.len());
        for spec in &self.recipe.initial {
            match spec.build(*next_id) {
                Ok(enemy) => {
                    enemies.push(enemy);
                    *next_id += 1;
                }
                Err(e) => log::warn!("skipping enemy {:?}: {}", spec, e),
            }
        }
        enemies
    }

    /// Working copy of the costume layout; invalid entries are logged and skipped
    pub fn build_costumes(&self) -> Vec<CostumePickup> {
        self.costumes
            .iter()
            .filter_map(|spec| match spec.build() {
                Ok(pickup) => Some(pickup),
                Err(e) => {
                    log::warn!("skipping costume {:?}: {}", spec, e);
                    None
                }
            })
            .collect()
    }
}

/// All levels, numbered from 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<LevelMap>,
}

impl LevelTable {
    /// Build a table. A broken board rejects the table; bad entries inside an
    /// otherwise sound level are only logged, and get skipped when it is played.
    pub fn new(levels: Vec<LevelMap>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::Malformed("level table is empty".into()));
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate()?;
            for problem in level.problems() {
                log::warn!("level {}: {}", i + 1, problem);
            }
        }
        Ok(Self { levels })
    }

    /// The fourteen shipped levels
    pub fn builtin() -> Self {
        Self {
            levels: builtin::levels(),
        }
    }

    /// Load a table from JSON (`{"levels": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: LevelTable = serde_json::from_str(json)?;
        Self::new(table.levels)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up level `n` (1-based)
    pub fn get(&self, n: u32) -> Result<&LevelMap, ConfigError> {
        n.checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .ok_or(ConfigError::UnknownLevel(n))
    }

    pub fn len(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn is_final(&self, n: u32) -> bool {
        n == self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::costume::CostumeKind;

    #[test]
    fn test_builtin_levels_are_valid() {
        let table = LevelTable::builtin();
        assert_eq!(table.len(), 14);
        for n in 1..=table.len() {
            let level = table.get(n).unwrap();
            assert_eq!(level.validate(), Ok(()), "level {}", n);
            assert_eq!(level.problems(), Vec::new(), "level {}", n);
            assert_eq!(level.build_obstacles().len(), level.obstacles.len());
            assert_eq!(level.build_costumes().len(), level.costumes.len());
        }
    }

    #[test]
    fn test_first_level_layout() {
        let table = LevelTable::builtin();
        let level = table.get(1).unwrap();
        assert_eq!((level.num_cols, level.num_rows), (4, 4));
        assert_eq!(level.player_start, Cell::new(1, 3));
        assert_eq!(level.player_finish, Cell::new(0, 0));
        assert!(level.obstacles.is_empty());
        assert!(level.recipe.initial.iter().all(|e| e.kind() == EnemyKind::Zombie));
    }

    #[test]
    fn test_unknown_level() {
        let table = LevelTable::builtin();
        assert_eq!(table.get(0).err(), Some(ConfigError::UnknownLevel(0)));
        assert_eq!(table.get(15).err(), Some(ConfigError::UnknownLevel(15)));
        assert!(table.is_final(14));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "levels": [{
                "num_cols": 3, "num_rows": 2,
                "player_start": {"x": 0, "y": 1},
                "player_finish": {"x": 2, "y": 0},
                "row_layout": ["grass", "stone"],
                "obstacles": [
                    {"type": "rock", "color": "red", "x": 1, "y": 0},
                    {"type": "web", "x": 1, "y": 1}
                ],
                "costumes": [{"type": "dwarf", "color": "red", "x": 0, "y": 0}],
                "recipe": {
                    "initial": [{"type": "zombie", "x": -1, "y": 1, "speed": 1.0}],
                    "spawns": [{"interval": 2.0, "kind": "zombie", "lanes": [1],
                                "min_speed": 1.0, "max_speed": 2.0}]
                }
            }]
        }"#;
        let table = LevelTable::from_json(json).unwrap();
        let level = table.get(1).unwrap();
        assert_eq!(level.obstacles.len(), 2);
        assert_eq!(level.recipe.spawns[0].side, SpawnSide::Start);
        assert_eq!(level.recipe.spawns[0].axis, Axis::Horizontal);
    }

    #[test]
    fn test_from_json_rejects_bad_data() {
        let unknown_tag = r#"{"levels": [{"num_cols": 1, "num_rows": 1,
            "player_start": {"x": 0, "y": 0}, "player_finish": {"x": 0, "y": 0},
            "row_layout": ["grass"], "obstacles": [{"type": "moat", "x": 0, "y": 0}]}]}"#;
        assert!(matches!(
            LevelTable::from_json(unknown_tag),
            Err(ConfigError::Malformed(_))
        ));

        let finish_off_board = r#"{"levels": [{"num_cols": 2, "num_rows": 1,
            "player_start": {"x": 0, "y": 0}, "player_finish": {"x": 2, "y": 0},
            "row_layout": ["grass"]}]}"#;
        assert!(matches!(
            LevelTable::from_json(finish_off_board),
            Err(ConfigError::Malformed(_))
        ));

        let short_rows = r#"{"levels": [{"num_cols": 2, "num_rows": 2,
            "player_start": {"x": 0, "y": 0}, "player_finish": {"x": 1, "y": 1},
            "row_layout": ["grass"]}]}"#;
        assert_eq!(
            LevelTable::from_json(short_rows),
            Err(ConfigError::InvalidBoard {
                cols: 2,
                rows: 2,
                row_tiles: 1
            })
        );
    }

    #[test]
    fn test_bad_entries_are_skipped_not_fatal() {
        let json = r#"{"levels": [{"num_cols": 4, "num_rows": 2,
            "player_start": {"x": 0, "y": 1}, "player_finish": {"x": 3, "y": 0},
            "row_layout": ["grass", "stone"],
            "obstacles": [
                {"type": "web", "x": 1, "y": 1},
                {"type": "laser", "color": "gray", "left": 0, "right": 2, "row": 0}
            ],
            "costumes": [{"type": "dwarf", "color": "gray", "x": 2, "y": 1}],
            "recipe": {
                "initial": [
                    {"type": "ghost", "x": 0, "y": 0, "speed": 1.0, "attack_factor": 0.5},
                    {"type": "zombie", "x": -1, "y": 1, "speed": 1.0}
                ],
                "spawns": [{"interval": 2.0, "kind": "ghost", "lanes": [0],
                            "min_speed": 1.0, "max_speed": 1.0, "attack_factor": -2.0}]
            }
        }]}"#;
        let table = LevelTable::from_json(json).unwrap();
        let level = table.get(1).unwrap();
        assert_eq!(
            level.problems(),
            vec![
                ConfigError::InvalidBeamColor(Color::Gray),
                ConfigError::InvalidCostumeColor {
                    kind: CostumeKind::Dwarf,
                    color: Color::Gray
                },
                ConfigError::InvalidAttackFactor(0.5),
                ConfigError::InvalidAttackFactor(-2.0),
            ]
        );

        assert_eq!(level.build_obstacles(), vec![Obstacle::Web(Web { cell: Cell::new(1, 1) })]);
        assert!(level.build_costumes().is_empty());
        let mut next_id = 10;
        let enemies = level.build_enemies(&mut next_id);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].kind(), EnemyKind::Zombie);
        assert_eq!(enemies[0].id, 10);
        assert_eq!(next_id, 11);
    }

    #[test]
    fn test_ghost_attack_factor_must_exceed_one() {
        let ghost = |attack_factor| EnemySpec::Ghost {
            x: 0.0,
            y: 1.0,
            speed: 1.0,
            attack_factor,
        };
        assert!(ghost(2.5).build(0).is_ok());
        assert_eq!(ghost(1.0).build(0).err(), Some(ConfigError::InvalidAttackFactor(1.0)));
        assert!(ghost(f32::NAN).build(0).is_err());

        let mut rule = SpawnRule {
            interval: 1.0,
            kind: EnemyKind::Ghost,
            axis: Axis::Horizontal,
            lanes: vec![0],
            min_speed: 1.0,
            max_speed: 1.0,
            side: SpawnSide::Start,
            attack_factor: 0.5,
            pause: 0.0,
        };
        assert_eq!(rule.validate(), Err(ConfigError::InvalidAttackFactor(0.5)));
        // Only ghosts use the factor
        rule.kind = EnemyKind::Zombie;
        assert_eq!(rule.validate(), Ok(()));
    }

    #[test]
    fn test_vertical_ghost_rule_rejected() {
        let rule = SpawnRule {
            interval: 1.0,
            kind: EnemyKind::Ghost,
            axis: Axis::Vertical,
            lanes: vec![0],
            min_speed: 1.0,
            max_speed: 1.0,
            side: SpawnSide::Start,
            attack_factor: 2.0,
            pause: 0.0,
        };
        assert_eq!(
            rule.validate(),
            Err(ConfigError::InvalidSpawnLane {
                kind: EnemyKind::Ghost
            })
        );
    }

    #[test]
    fn test_table_round_trips_through_json() {
        let table = LevelTable::builtin();
        let json = table.to_json().unwrap();
        assert_eq!(LevelTable::from_json(&json).unwrap(), table);
    }
}
