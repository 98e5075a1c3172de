use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::{GridSize, MIN_DATA_GRID_SIDE};
use crate::error::{DataError, EngineError};
use crate::food::Food;
use crate::game::Game;
use crate::grid::Position;

/// One row of external tabular data.
#[derive(Debug, Clone, Deserialize)]
struct FoodRow {
    x: f64,
    y: f64,
    #[serde(default)]
    color: Option<String>,
}

/// Grid size and food collection derived from an external data source.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodFeed {
    pub size: GridSize,
    pub foods: Vec<Food>,
}

impl FoodFeed {
    /// Parses a JSON array of `{ "x", "y", "color"? }` rows.
    ///
    /// Coordinates are rounded to the nearest cell and identities follow row
    /// order. The grid is square, large enough for every row and never
    /// smaller than [`MIN_DATA_GRID_SIDE`].
    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        let rows: Vec<FoodRow> = serde_json::from_str(raw)?;

        let mut side = i64::from(MIN_DATA_GRID_SIDE);
        let mut foods = Vec::with_capacity(rows.len());

        for (row_index, row) in rows.into_iter().enumerate() {
            let (Some(x), Some(y)) = (to_cell(row.x), to_cell(row.y)) else {
                return Err(DataError::BadCoordinate { row: row_index });
            };
            side = side.max(i64::from(x) + 1).max(i64::from(y) + 1);

            let mut food = Food::new(row_index, Position::new(x, y));
            food.color = row.color;
            foods.push(food);
        }

        let side = u16::try_from(side).unwrap_or(u16::MAX);

        Ok(Self {
            size: GridSize {
                width: side,
                height: side,
            },
            foods,
        })
    }

    /// Reads and parses a feed file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let raw = fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Seeds `game` with this feed's grid size and food. Call before the
    /// first tick.
    pub fn apply(self, game: &mut Game) -> Result<(), EngineError> {
        game.set_size(self.size.width, self.size.height)?;
        game.set_data(self.foods);
        Ok(())
    }
}

fn to_cell(value: f64) -> Option<i32> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u16::MAX - 1) {
        return None;
    }
    // Range-checked above.
    Some(rounded as i32)
}
