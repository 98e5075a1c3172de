use serde::{Deserialize, Serialize};

pub use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`, unbounded.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y + 1),
            Direction::Down => Self::new(self.x, self.y - 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Applies the wraparound policy for a head that just moved towards `direction`.
///
/// Only the axis of travel is checked: past the upper bound resets to `0`,
/// below `0` resets to the last cell.
#[must_use]
pub fn wrap_after_move(position: Position, direction: Direction, bounds: GridSize) -> Position {
    let width = i32::from(bounds.width);
    let height = i32::from(bounds.height);

    match direction {
        Direction::Up if position.y >= height => Position::new(position.x, 0),
        Direction::Down if position.y < 0 => Position::new(position.x, height - 1),
        Direction::Left if position.x < 0 => Position::new(width - 1, position.y),
        Direction::Right if position.x >= width => Position::new(0, position.y),
        _ => position,
    }
}

/// Computes the next head cell: one step towards `direction`, then wrapped.
#[must_use]
pub fn next_head(head: Position, direction: Direction, bounds: GridSize) -> Position {
    wrap_after_move(head.step(direction), direction, bounds)
}
