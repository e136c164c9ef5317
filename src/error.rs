//! Configuration errors
//!
//! Raised when level data, obstacles or costumes are built from invalid
//! parameters. None of these are fatal to a running session: callers log them
//! and skip the offending entry.

use thiserror::Error;

use crate::sim::color::Color;
use crate::sim::costume::CostumeKind;
use crate::sim::enemy::EnemyKind;

/// Invalid static game data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("level {0} is not a valid level")]
    UnknownLevel(u32),

    #[error("laser nodes are not on the same row (left row {left_row}, right row {right_row})")]
    LaserNodesNotCoRow { left_row: i32, right_row: i32 },

    #[error("laser left node ({left}) must be left of its right node ({right})")]
    InvalidLaserSpan { left: i32, right: i32 },

    #[error("{0:?} is not a valid laser beam color")]
    InvalidBeamColor(Color),

    #[error("{color:?} is not a valid color for a {kind:?} costume")]
    InvalidCostumeColor { kind: CostumeKind, color: Color },

    #[error("{kind:?} enemies cannot travel along a column")]
    InvalidSpawnLane { kind: EnemyKind },

    #[error("ghost attack factor must be greater than 1, got {0}")]
    InvalidAttackFactor(f32),

    #[error("board {cols}x{rows} has {row_tiles} row tiles")]
    InvalidBoard { cols: u32, rows: u32, row_tiles: usize },

    #[error("malformed game data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}
