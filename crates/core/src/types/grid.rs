use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete map cell expressed in tile coordinates.
///
/// Screen convention: `y` grows downwards, so [`Direction::Up`] decrements it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance, `|x1 - x2| + |y1 - y2|`.
    #[inline]
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four grid directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Single step from `from` that reduces the distance to `to`.
    ///
    /// The x-axis mismatch is resolved before the y-axis. Returns `None` when
    /// both cells coincide.
    pub fn toward(from: Cell, to: Cell) -> Option<Self> {
        if from.x < to.x {
            Some(Direction::Right)
        } else if from.x > to.x {
            Some(Direction::Left)
        } else if from.y < to.y {
            Some(Direction::Down)
        } else if from.y > to.y {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_follows_screen_axes() {
        let origin = Cell::ORIGIN;
        assert_eq!(origin.step(Direction::Up), Cell::new(0, -1));
        assert_eq!(origin.step(Direction::Down), Cell::new(0, 1));
        assert_eq!(origin.step(Direction::Left), Cell::new(-1, 0));
        assert_eq!(origin.step(Direction::Right), Cell::new(1, 0));
    }

    #[test]
    fn toward_resolves_x_before_y() {
        let from = Cell::new(0, 0);
        assert_eq!(Direction::toward(from, Cell::new(2, 5)), Some(Direction::Right));
        assert_eq!(Direction::toward(from, Cell::new(-1, -5)), Some(Direction::Left));
        assert_eq!(Direction::toward(from, Cell::new(0, 3)), Some(Direction::Down));
        assert_eq!(Direction::toward(from, Cell::new(0, -3)), Some(Direction::Up));
        assert_eq!(Direction::toward(from, from), None);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Cell::new(1, 2).manhattan(Cell::new(-2, 4)), 5);
        assert_eq!(Cell::new(3, 3).manhattan(Cell::new(3, 3)), 0);
    }
}
