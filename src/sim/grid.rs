//! Board cells and movement directions

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete board cell (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `direction`
    pub fn step(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// Board position as a real-valued grid location
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// True if the cell lies on a `cols` x `rows` board
    pub fn within(&self, cols: u32, rows: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < cols && (self.y as u32) < rows
    }
}

/// One discrete move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (dx, dy) in cells; rows grow downward
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let c = Cell::new(2, 2);
        assert_eq!(c.step(Direction::Up), Cell::new(2, 1));
        assert_eq!(c.step(Direction::Down), Cell::new(2, 3));
        assert_eq!(c.step(Direction::Left), Cell::new(1, 2));
        assert_eq!(c.step(Direction::Right), Cell::new(3, 2));
    }

    #[test]
    fn test_within() {
        assert!(Cell::new(0, 0).within(4, 4));
        assert!(Cell::new(3, 3).within(4, 4));
        assert!(!Cell::new(4, 0).within(4, 4));
        assert!(!Cell::new(0, -1).within(4, 4));
    }
}
