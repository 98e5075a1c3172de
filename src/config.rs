use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Position;
use crate::input::Direction;
use crate::snake::Snake;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when either axis is zero.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 32;

/// Smallest square side used when the grid is derived from external data.
pub const MIN_DATA_GRID_SIDE: u16 = 32;

/// Base ("normal") tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: f64 = 750.0;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: f64 = 60.0;

/// Turbo speed is the level speed divided by this factor.
pub const TURBO_DIVISOR: f64 = 5.0;

/// Milliseconds removed from the tick interval per level, before scaling.
pub const LEVEL_SPEEDUP_MS: f64 = 10.0;

/// Scaling applied to the per-level speedup.
pub const LEVEL_SPEEDUP_FACTOR: f64 = 0.75;

/// Points granted per food at full level progress.
pub const DEFAULT_POINTS_PER_FOOD: u32 = 10;

/// Foods eaten per level increase.
pub const DEFAULT_FOODS_PER_LEVEL: u32 = 5;

/// Number of food items placed when no external data is supplied.
pub const DEFAULT_INITIAL_FOOD_COUNT: usize = 4;

/// Start configuration for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeStart {
    pub x: i32,
    pub y: i32,
    pub length: usize,
    pub facing: Direction,
}

impl SnakeStart {
    /// Builds the straight starting snake.
    #[must_use]
    pub fn build(self) -> Snake {
        Snake::straight(Position::new(self.x, self.y), self.length, self.facing)
    }

    /// Checks that every cell of the starting snake lies on `grid`.
    pub fn check_fits(self, grid: GridSize) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::Invalid(
                "snake length must be at least 1".to_owned(),
            ));
        }

        let snake = self.build();
        if let Some(cell) = snake
            .segments()
            .iter()
            .find(|cell| !cell.is_within_bounds(grid))
        {
            return Err(ConfigError::Invalid(format!(
                "snake cell ({}, {}) is outside the {}x{} grid",
                cell.x, cell.y, grid.width, grid.height
            )));
        }

        Ok(())
    }
}

impl Default for SnakeStart {
    fn default() -> Self {
        Self {
            x: 2,
            y: 5,
            length: 3,
            facing: Direction::Up,
        }
    }
}

/// Tunables for one game session.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Normal tick interval in milliseconds.
    pub speed_ms: f64,
    /// Floor applied to the level-adjusted tick interval.
    pub min_speed_ms: f64,
    pub points_per_food: u32,
    pub foods_per_level: u32,
    pub snake: SnakeStart,
    /// Food items generated at startup when no data feed is given.
    pub initial_food_count: usize,
    /// Seed for food placement; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            speed_ms: DEFAULT_TICK_INTERVAL_MS,
            min_speed_ms: MIN_TICK_INTERVAL_MS,
            points_per_food: DEFAULT_POINTS_PER_FOOD,
            foods_per_level: DEFAULT_FOODS_PER_LEVEL,
            snake: SnakeStart::default(),
            initial_food_count: DEFAULT_INITIAL_FOOD_COUNT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file and validates it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.is_degenerate() {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }

        if self.foods_per_level == 0 {
            return Err(ConfigError::Invalid(
                "foods_per_level must be at least 1".to_owned(),
            ));
        }

        if !(self.speed_ms > 0.0) || !(self.min_speed_ms > 0.0) {
            return Err(ConfigError::Invalid(
                "speed_ms and min_speed_ms must be positive".to_owned(),
            ));
        }

        self.snake.check_fits(self.grid)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GameConfig, GridSize, SnakeStart};
    use crate::input::Direction;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.grid.total_cells(), 32 * 32);
        assert_eq!(config.snake.facing, Direction::Up);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "grid": { "width": 8, "height": 8 }, "seed": 9 }"#)
                .expect("partial config should parse");

        assert_eq!(
            config.grid,
            GridSize {
                width: 8,
                height: 8
            }
        );
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.points_per_food, 10);
        assert_eq!(config.foods_per_level, 5);
    }

    #[test]
    fn zero_foods_per_level_is_rejected() {
        let config = GameConfig {
            foods_per_level: 0,
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn snake_longer_than_axis_is_rejected() {
        let mut config = GameConfig::default();
        config.grid = GridSize {
            width: 32,
            height: 2,
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn start_off_the_grid_is_rejected() {
        let config = GameConfig {
            grid: GridSize {
                width: 4,
                height: 4,
            },
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn body_trailing_past_the_edge_is_rejected() {
        let start = SnakeStart {
            x: 3,
            y: 0,
            length: 3,
            facing: Direction::Up,
        };
        let grid = GridSize {
            width: 8,
            height: 8,
        };

        let raised = SnakeStart { y: 2, ..start };

        assert!(start.check_fits(grid).is_err());
        assert!(raised.check_fits(grid).is_ok());
    }
}
