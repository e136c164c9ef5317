//! Colors shared by rocks, lasers and costumes

use serde::{Deserialize, Serialize};

/// Obstacle / costume color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    /// Plain rock color; no costume or beam comes in gray
    Gray,
}

impl Color {
    /// Colors available to dwarf/laserman costumes and laser beams
    pub fn is_vivid(&self) -> bool {
        !matches!(self, Color::Gray)
    }
}
