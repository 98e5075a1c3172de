use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::config::GridSize;
use crate::grid::Position;
use crate::snake::Snake;

/// Food item on the board.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Food {
    /// Stable identity: the collection index at creation time.
    pub id: usize,
    #[serde(flatten)]
    pub position: Position,
    /// Display tag carried through untouched, e.g. `"#FB8B24"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Food {
    /// Creates an untagged food item.
    #[must_use]
    pub fn new(id: usize, position: Position) -> Self {
        Self {
            id,
            position,
            color: None,
        }
    }

    /// Attaches a display tag.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Places one new food item on a uniformly random free cell.
///
/// Cells covered by the snake or by existing food are rejected and a new cell
/// is drawn. There is no attempt cap: the caller must make sure at least one
/// free cell exists (see [`free_cell_count`]), otherwise this never returns.
/// The new item's identity is `foods.len()` and it carries no color.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: Option<&Snake>,
    foods: &[Food],
) -> Food {
    let excluded = occupied_cells(snake, foods);

    loop {
        let candidate = Position::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );

        if !excluded.contains(&candidate) {
            return Food::new(foods.len(), candidate);
        }
    }
}

/// Counts in-bounds cells covered by neither the snake nor any food.
#[must_use]
pub fn free_cell_count(bounds: GridSize, snake: Option<&Snake>, foods: &[Food]) -> usize {
    let occupied = occupied_cells(snake, foods)
        .into_iter()
        .filter(|cell| cell.is_within_bounds(bounds))
        .count();

    bounds.total_cells().saturating_sub(occupied)
}

fn occupied_cells(snake: Option<&Snake>, foods: &[Food]) -> HashSet<Position> {
    snake
        .map(Snake::segments)
        .unwrap_or_default()
        .iter()
        .copied()
        .chain(foods.iter().map(|food| food.position))
        .collect()
}
