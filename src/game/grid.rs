use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Bounded playfield. The outermost ring of cells is wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        pos.x == 0 || pos.x == self.width - 1 || pos.y == 0 || pos.y == self.height - 1
    }

    /// Strictly inside the wall ring
    pub fn is_playable(&self, pos: Position) -> bool {
        self.playable_x().contains(&pos.x) && self.playable_y().contains(&pos.y)
    }

    pub fn playable_x(&self) -> RangeInclusive<i32> {
        1..=self.width - 2
    }

    pub fn playable_y(&self) -> RangeInclusive<i32> {
        1..=self.height - 2
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}
