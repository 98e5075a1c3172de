use serde::Serialize;

use crate::config::GridSize;
use crate::food::Food;
use crate::input::Direction;
use crate::snake::Snake;

/// Immutable per-tick snapshot handed to every renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Host timestamp of the tick, in milliseconds.
    pub timestamp: f64,
    pub snake: Option<Snake>,
    pub food: Vec<Food>,
    pub score: f64,
    pub level: u32,
    pub direction: Direction,
    /// Current tick interval relative to the normal one, rounded to 2 decimals.
    pub speed_multiplier: f64,
}

impl Frame {
    /// Returns the snake length, or zero when no snake is assigned.
    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.as_ref().map_or(0, Snake::len)
    }
}

/// Rounds `speed / normal_speed` to two decimals.
#[must_use]
pub fn speed_multiplier(speed_ms: f64, normal_speed_ms: f64) -> f64 {
    ((speed_ms / normal_speed_ms) * 100.0).round() / 100.0
}

/// Initial game description passed to renderer `init` hooks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDescription {
    pub size: GridSize,
    pub snake: Option<Snake>,
    pub food: Vec<Food>,
    pub normal_speed_ms: f64,
    pub points_per_food: u32,
    pub foods_per_level: u32,
}
