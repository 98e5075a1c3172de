use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{
    GameConfig, GridSize, LEVEL_SPEEDUP_FACTOR, LEVEL_SPEEDUP_MS, TURBO_DIVISOR,
};
use crate::error::EngineError;
use crate::food::{Food, free_cell_count, place_food};
use crate::frame::{Frame, GameDescription, speed_multiplier};
use crate::grid::{self, Position};
use crate::input::{Direction, InputAction, direction_change_is_valid};
use crate::renderer::{Renderer, RendererRegistry};
use crate::snake::Snake;

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Constructed; renderers have not been initialized.
    Uninitialized,
    /// Renderers initialized, not ticking yet.
    Initialized,
    /// Ticking on the host schedule.
    Running,
    /// Schedule halted; state is kept and the game can be restarted.
    Stopped,
}

/// What the movement step of a tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// First tick after a (re)start: only the timestamp baseline was set.
    Baseline,
    /// No snake assigned yet.
    NoSnake,
    Moved { head: Position },
    Ate { head: Position, food: Food },
}

/// Level reached after `eaten` foods.
#[must_use]
pub fn level_for(eaten: u32, foods_per_level: u32) -> u32 {
    eaten / foods_per_level + 1
}

/// Score added when the `eaten`-th food is consumed.
///
/// The increment scales with level progress rather than being flat.
#[must_use]
pub fn score_increment(eaten: u32, foods_per_level: u32, points_per_food: u32) -> f64 {
    f64::from(eaten) / f64::from(foods_per_level) * f64::from(points_per_food)
}

/// Tick interval for `level`, never below `min_speed_ms`.
#[must_use]
pub fn level_speed(normal_speed_ms: f64, level: u32, min_speed_ms: f64) -> f64 {
    let speedup = LEVEL_SPEEDUP_MS * f64::from(level.saturating_sub(1)) * LEVEL_SPEEDUP_FACTOR;
    (normal_speed_ms - speedup).max(min_speed_ms)
}

/// Simulation engine: owns the game state and the renderers it feeds.
///
/// All operations run on the caller's thread; a tick completes before any
/// other call can observe the state. Direction and speed-mode requests are
/// buffered and applied together at the start of the next tick.
#[derive(Debug)]
pub struct Game {
    renderers: RendererRegistry,
    phase: Phase,
    snake: Option<Snake>,
    foods: Vec<Food>,
    bounds: GridSize,
    direction: Direction,
    requested_direction: Direction,
    turbo: bool,
    requested_turbo: bool,
    score: f64,
    level: u32,
    eaten: u32,
    points_per_food: u32,
    foods_per_level: u32,
    normal_speed_ms: f64,
    level_speed_ms: f64,
    min_speed_ms: f64,
    tick_count: u64,
    tick_baseline: Option<f64>,
    last_frame: Option<Frame>,
    rng: StdRng,
}

impl Game {
    /// Creates an engine around an explicit snake and food collection.
    ///
    /// `config.snake` and `config.initial_food_count` are not used here.
    #[must_use]
    pub fn new(
        renderers: Vec<Box<dyn Renderer>>,
        snake: Option<Snake>,
        foods: Vec<Food>,
        config: &GameConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let direction = snake.as_ref().map_or(Direction::Up, Snake::facing);

        Self {
            renderers: RendererRegistry::new(renderers),
            phase: Phase::Uninitialized,
            snake,
            foods,
            bounds: config.grid,
            direction,
            requested_direction: direction,
            turbo: false,
            requested_turbo: false,
            score: 0.0,
            level: 1,
            eaten: 0,
            points_per_food: config.points_per_food,
            foods_per_level: config.foods_per_level.max(1),
            normal_speed_ms: config.speed_ms,
            level_speed_ms: config.speed_ms.max(config.min_speed_ms),
            min_speed_ms: config.min_speed_ms,
            tick_count: 0,
            tick_baseline: None,
            last_frame: None,
            rng,
        }
    }

    /// Creates an engine with the configured straight snake and randomly
    /// placed initial food.
    #[must_use]
    pub fn from_config(renderers: Vec<Box<dyn Renderer>>, config: &GameConfig) -> Self {
        let mut game = Self::new(renderers, Some(config.snake.build()), Vec::new(), config);
        for _ in 0..config.initial_food_count {
            if free_cell_count(game.bounds, game.snake.as_ref(), &game.foods) == 0 {
                break;
            }
            let food = place_food(&mut game.rng, game.bounds, game.snake.as_ref(), &game.foods);
            game.foods.push(food);
        }
        game
    }

    /// Resizes the grid. Only allowed before the first tick.
    pub fn set_size(&mut self, width: u16, height: u16) -> Result<(), EngineError> {
        let bounds = GridSize { width, height };
        if bounds.is_degenerate() {
            return Err(EngineError::InvalidGrid { width, height });
        }
        if self.tick_baseline.is_some() || self.tick_count > 0 {
            return Err(EngineError::GridLocked);
        }

        info!("grid resized to {width}x{height}");
        self.bounds = bounds;
        Ok(())
    }

    /// Replaces the whole food collection.
    pub fn set_data(&mut self, foods: Vec<Food>) {
        info!("food collection replaced with {} item(s)", foods.len());
        self.foods = foods;
    }

    /// Replaces the snake; the engine direction follows its facing.
    pub fn add_snake(&mut self, snake: Snake) {
        self.direction = snake.facing();
        self.requested_direction = snake.facing();
        self.snake = Some(snake);
    }

    /// Calls `init` on every renderer that wants it. Allowed once.
    pub fn init_engines(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Uninitialized {
            return Err(EngineError::AlreadyInitialized);
        }

        let description = self.describe();
        self.renderers.init(&description);
        self.phase = Phase::Initialized;
        info!("initialized {} renderer(s)", self.renderers.len());
        Ok(())
    }

    /// Enters `running`; the next tick only sets the timestamp baseline.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        self.tick_baseline = None;
        self.phase = Phase::Running;
        info!("game running");
        Ok(())
    }

    /// Renders a single baseline frame without entering `running`.
    pub fn preview(&mut self, timestamp: f64) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        self.tick_baseline = None;
        self.tick(timestamp).map(|_| ())
    }

    /// Notifies renderers, then starts. A running game is left alone.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized()?;
        if self.phase == Phase::Running {
            return Ok(());
        }

        self.renderers.start_game();
        self.start()
    }

    /// Halts the run loop; state is kept for a later restart. Renderers are
    /// only notified when a running game actually stops.
    pub fn stop(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.phase = Phase::Stopped;
        info!("game stopped after {} tick(s)", self.tick_count);
        self.renderers.stop_game();
    }

    /// Asks renderers to show their start screen.
    pub fn screen_game_start(&mut self) {
        self.renderers.screen_game_start();
    }

    pub fn hover_datapoint(&mut self, food: &Food, x: f64, y: f64) {
        self.renderers.hover_datapoint(food, x, y);
    }

    pub fn hover_out(&mut self, food: &Food) {
        self.renderers.hover_out(food);
    }

    /// Requests the direction for the next tick.
    ///
    /// Returns `false`, leaving the request unchanged, when `direction` is the
    /// exact opposite of the current direction.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            debug!("rejected reversal {:?} -> {direction:?}", self.direction);
            return false;
        }

        self.requested_direction = direction;
        true
    }

    /// Requests turbo (`true`) or normal speed for the next tick onwards.
    pub fn set_speed_mode(&mut self, turbo: bool) {
        self.requested_turbo = turbo;
    }

    /// Applies one normalized input action.
    pub fn apply_input(&mut self, action: InputAction) -> Result<(), EngineError> {
        match action {
            InputAction::Steer(direction) => {
                self.set_direction(direction);
            }
            InputAction::Turbo(turbo) => self.set_speed_mode(turbo),
            InputAction::Stop => self.stop(),
            InputAction::Start => self.start_game()?,
            InputAction::Quit => {}
        }
        Ok(())
    }

    /// Advances one tick at `timestamp` (milliseconds) and renders the frame.
    ///
    /// The first tick after a (re)start moves nothing. Render failures are
    /// returned after every renderer has been called; the frame and the
    /// timestamp baseline are recorded either way.
    pub fn tick(&mut self, timestamp: f64) -> Result<TickOutcome, EngineError> {
        self.ensure_initialized()?;

        let outcome = if self.tick_baseline.is_some() {
            self.advance()
        } else {
            self.apply_pending();
            TickOutcome::Baseline
        };
        debug!("tick at {timestamp}: {outcome:?}");

        let rendered = self.run_frame(timestamp);
        self.tick_baseline = Some(timestamp);
        rendered.map(|()| outcome)
    }

    /// Movement step of a tick. Pending direction and speed mode are applied
    /// first.
    fn advance(&mut self) -> TickOutcome {
        self.apply_pending();

        let Some(snake) = self.snake.as_ref() else {
            return TickOutcome::NoSnake;
        };

        let head = grid::next_head(snake.head(), self.direction, self.bounds);
        let eaten_index = self.foods.iter().position(|food| food.position == head);
        let moved = snake
            .advanced(head, eaten_index.is_some())
            .facing_towards(self.direction);

        self.snake = Some(moved);
        self.tick_count += 1;

        match eaten_index {
            Some(index) => TickOutcome::Ate {
                head,
                food: self.consume(index),
            },
            None => TickOutcome::Moved { head },
        }
    }

    /// Builds a frame from the current state and hands it to every renderer.
    pub fn run_frame(&mut self, timestamp: f64) -> Result<(), EngineError> {
        self.ensure_initialized()?;

        let frame = Frame {
            timestamp,
            snake: self
                .snake
                .clone()
                .map(|snake| snake.facing_towards(self.direction)),
            food: self.foods.clone(),
            score: self.score,
            level: self.level,
            direction: self.direction,
            speed_multiplier: speed_multiplier(self.current_speed_ms(), self.normal_speed_ms),
        };

        let failures = self.renderers.render(&frame);
        self.last_frame = Some(frame);

        if failures.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Render { failures })
        }
    }

    /// Delay the host should wait before the next tick.
    #[must_use]
    pub fn tick_delay(&self) -> Duration {
        Duration::from_secs_f64(self.current_speed_ms().max(0.0) / 1000.0)
    }

    /// Active tick interval in milliseconds.
    #[must_use]
    pub fn current_speed_ms(&self) -> f64 {
        if self.turbo {
            self.turbo_speed_ms()
        } else {
            self.level_speed_ms
        }
    }

    #[must_use]
    pub fn turbo_speed_ms(&self) -> f64 {
        self.level_speed_ms / TURBO_DIVISOR
    }

    #[must_use]
    pub fn normal_speed_ms(&self) -> f64 {
        self.normal_speed_ms
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    fn ensure_initialized(&self) -> Result<(), EngineError> {
        if self.phase == Phase::Uninitialized {
            return Err(EngineError::EnginesNotInitialized);
        }
        Ok(())
    }

    fn apply_pending(&mut self) {
        self.direction = self.requested_direction;
        self.turbo = self.requested_turbo;
    }

    fn describe(&self) -> GameDescription {
        GameDescription {
            size: self.bounds,
            snake: self.snake.clone(),
            food: self.foods.clone(),
            normal_speed_ms: self.normal_speed_ms,
            points_per_food: self.points_per_food,
            foods_per_level: self.foods_per_level,
        }
    }

    /// Scores the food at `index` and swaps it for a freshly placed one.
    ///
    /// The speed drops back to the level speed; turbo stays off until it is
    /// requested again.
    fn consume(&mut self, index: usize) -> Food {
        let mut foods = self.foods.clone();
        let eaten = foods.remove(index);

        let previous_level = self.level;
        self.eaten += 1;
        self.level = level_for(self.eaten, self.foods_per_level);
        self.score += score_increment(self.eaten, self.foods_per_level, self.points_per_food);
        self.level_speed_ms = level_speed(self.normal_speed_ms, self.level, self.min_speed_ms);
        self.turbo = false;
        self.requested_turbo = false;

        if self.level > previous_level {
            info!(
                "level {} reached, tick interval now {:.1} ms",
                self.level, self.level_speed_ms
            );
        }

        if free_cell_count(self.bounds, self.snake.as_ref(), &foods) > 0 {
            let food = place_food(&mut self.rng, self.bounds, self.snake.as_ref(), &foods);
            foods.push(food);
        } else {
            warn!("no free cell left, food #{} not replaced", eaten.id);
        }

        self.foods = foods;
        eaten
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Phase, TickOutcome, level_for, level_speed, score_increment};
    use crate::config::{GameConfig, GridSize};
    use crate::error::EngineError;
    use crate::food::Food;
    use crate::grid::Position;
    use crate::input::{Direction, InputAction};
    use crate::snake::Snake;

    fn config(width: u16, height: u16) -> GameConfig {
        GameConfig {
            grid: GridSize { width, height },
            seed: Some(11),
            ..GameConfig::default()
        }
    }

    fn game_with(snake: Snake, foods: Vec<Food>, width: u16, height: u16) -> Game {
        let mut game = Game::new(Vec::new(), Some(snake), foods, &config(width, height));
        game.init_engines().expect("first init should succeed");
        game
    }

    #[test]
    fn level_and_score_follow_progress() {
        assert_eq!(level_for(1, 5), 1);
        assert_eq!(level_for(4, 5), 1);
        assert_eq!(level_for(5, 5), 2);
        assert_eq!(level_for(10, 5), 3);

        assert_eq!(score_increment(5, 5, 10), 10.0);
        assert_eq!(score_increment(10, 5, 10), 20.0);
        assert_eq!(score_increment(1, 5, 10), 2.0);
    }

    #[test]
    fn level_speed_decreases_and_is_clamped() {
        assert_eq!(level_speed(750.0, 1, 60.0), 750.0);
        assert_eq!(level_speed(750.0, 2, 60.0), 742.5);
        assert_eq!(level_speed(750.0, 3, 60.0), 735.0);
        assert_eq!(level_speed(750.0, 500, 60.0), 60.0);
    }

    #[test]
    fn eating_grows_snake_and_replaces_food() {
        let snake = Snake::from_segments(
            vec![Position::new(2, 5), Position::new(2, 4)],
            Direction::Up,
        )
        .expect("segments are non-empty");
        let mut game = game_with(snake, vec![Food::new(0, Position::new(2, 6))], 8, 8);

        let outcome = game.advance();

        assert!(matches!(outcome, TickOutcome::Ate { head, .. } if head == Position::new(2, 6)));
        let snake = game.snake().expect("snake is assigned");
        assert_eq!(
            snake.segments(),
            &[
                Position::new(2, 6),
                Position::new(2, 5),
                Position::new(2, 4)
            ]
        );
        assert_eq!(game.eaten(), 1);
        assert_eq!(game.level(), 1);
        assert_eq!(game.foods().len(), 1);
        assert!(!snake.occupies(game.foods()[0].position));
    }

    #[test]
    fn moving_without_food_keeps_length() {
        let snake = Snake::straight(Position::new(3, 3), 3, Direction::Right);
        let mut game = game_with(snake, vec![Food::new(0, Position::new(0, 0))], 8, 8);

        let outcome = game.advance();

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                head: Position::new(4, 3)
            }
        );
        assert_eq!(game.snake().map(Snake::len), Some(3));
        assert_eq!(game.foods(), &[Food::new(0, Position::new(0, 0))]);
    }

    #[test]
    fn first_matching_food_is_eaten_and_others_are_kept() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let foods = vec![
            Food::new(0, Position::new(5, 5)),
            Food::new(1, Position::new(2, 1)).with_color("blue"),
            Food::new(2, Position::new(2, 1)),
        ];
        let mut game = game_with(snake, foods, 8, 8);

        let outcome = game.advance();

        let food = match outcome {
            TickOutcome::Ate { food, .. } => food,
            other => panic!("expected a collision, got {other:?}"),
        };
        assert_eq!(food.id, 1);
        assert_eq!(game.foods()[0], Food::new(0, Position::new(5, 5)));
        assert_eq!(game.foods()[1], Food::new(2, Position::new(2, 1)));
        assert_eq!(game.foods()[2].id, 2);
    }

    #[test]
    fn reversal_request_is_ignored() {
        let snake = Snake::straight(Position::new(4, 4), 2, Direction::Up);
        let mut game = game_with(snake, Vec::new(), 8, 8);

        assert!(!game.set_direction(Direction::Down));
        game.advance();

        assert_eq!(game.direction(), Direction::Up);
        assert_eq!(game.snake().map(Snake::head), Some(Position::new(4, 5)));
    }

    #[test]
    fn repeated_direction_requests_are_idempotent() {
        let snake = Snake::straight(Position::new(4, 4), 2, Direction::Up);
        let mut once = game_with(snake.clone(), Vec::new(), 8, 8);
        let mut twice = game_with(snake, Vec::new(), 8, 8);

        once.set_direction(Direction::Left);
        twice.set_direction(Direction::Left);
        twice.set_direction(Direction::Left);

        assert_eq!(once.advance(), twice.advance());
        assert_eq!(once.snake(), twice.snake());
    }

    #[test]
    fn direction_applies_only_at_the_next_tick() {
        let snake = Snake::straight(Position::new(4, 4), 2, Direction::Up);
        let mut game = game_with(snake, Vec::new(), 8, 8);

        game.set_direction(Direction::Right);
        assert_eq!(game.direction(), Direction::Up);

        game.advance();
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.snake().map(Snake::facing), Some(Direction::Right));
    }

    #[test]
    fn ticking_before_init_fails() {
        let mut game = Game::new(Vec::new(), None, Vec::new(), &config(8, 8));

        assert!(matches!(
            game.tick(1.0),
            Err(EngineError::EnginesNotInitialized)
        ));
        assert!(matches!(
            game.run_frame(1.0),
            Err(EngineError::EnginesNotInitialized)
        ));
    }

    #[test]
    fn init_is_allowed_once() {
        let mut game = Game::new(Vec::new(), None, Vec::new(), &config(8, 8));

        assert!(game.init_engines().is_ok());
        assert!(matches!(
            game.init_engines(),
            Err(EngineError::AlreadyInitialized)
        ));
    }

    #[test]
    fn first_tick_sets_baseline_only() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let mut game = game_with(snake, Vec::new(), 8, 8);
        game.start().expect("initialized game should start");

        assert_eq!(game.tick(100.0).ok(), Some(TickOutcome::Baseline));
        assert_eq!(game.snake().map(Snake::head), Some(Position::new(1, 1)));

        assert_eq!(
            game.tick(200.0).ok(),
            Some(TickOutcome::Moved {
                head: Position::new(2, 1)
            })
        );
        assert_eq!(game.last_frame().map(|frame| frame.timestamp), Some(200.0));
    }

    #[test]
    fn restart_resets_the_baseline() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let mut game = game_with(snake, Vec::new(), 8, 8);
        game.start_game().expect("start should succeed");
        game.tick(1.0).expect("tick should succeed");
        game.tick(2.0).expect("tick should succeed");

        game.stop();
        assert_eq!(game.phase(), Phase::Stopped);
        game.apply_input(InputAction::Start).expect("restart should succeed");
        assert!(game.is_running());

        assert_eq!(game.tick(3.0).ok(), Some(TickOutcome::Baseline));
        assert_eq!(game.snake().map(Snake::head), Some(Position::new(2, 1)));
    }

    #[test]
    fn no_snake_means_no_movement() {
        let mut game = Game::new(Vec::new(), None, Vec::new(), &config(8, 8));
        game.init_engines().expect("first init should succeed");
        game.start().expect("initialized game should start");

        assert_eq!(game.tick(1.0).ok(), Some(TickOutcome::Baseline));
        assert_eq!(game.tick(2.0).ok(), Some(TickOutcome::NoSnake));
        assert_eq!(game.tick_count(), 0);
    }

    #[test]
    fn uninitialized_engine_never_moves() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let food = Food::new(0, Position::new(2, 1));
        let mut game = Game::new(Vec::new(), Some(snake), vec![food.clone()], &config(8, 8));

        for timestamp in [1.0, 2.0, 3.0] {
            assert!(matches!(
                game.tick(timestamp),
                Err(EngineError::EnginesNotInitialized)
            ));
        }

        assert_eq!(game.tick_count(), 0);
        assert_eq!(game.snake().map(Snake::head), Some(Position::new(1, 1)));
        assert_eq!(game.foods(), &[food]);
        assert_eq!(game.eaten(), 0);
    }

    #[test]
    fn eating_drops_turbo_back_to_level_speed() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let mut game = game_with(snake, vec![Food::new(0, Position::new(3, 1))], 8, 8);
        game.start().expect("initialized game should start");
        game.tick(0.0).expect("baseline tick");

        game.set_speed_mode(true);
        game.tick(1.0).expect("tick should render");
        assert_eq!(game.current_speed_ms(), 150.0);

        let outcome = game.tick(2.0).expect("tick should render");

        assert!(matches!(outcome, TickOutcome::Ate { .. }));
        assert_eq!(game.current_speed_ms(), 750.0);
        assert_eq!(game.last_frame().map(|f| f.speed_multiplier), Some(1.0));

        assert_eq!(game.tick_delay().as_millis(), 750);
    }

    #[test]
    fn turbo_applies_at_next_tick() {
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        let mut game = game_with(snake, Vec::new(), 8, 8);

        game.set_speed_mode(true);
        assert_eq!(game.current_speed_ms(), 750.0);

        game.advance();
        assert_eq!(game.current_speed_ms(), 150.0);
        game.run_frame(5.0).expect("frame should render");
        assert_eq!(game.last_frame().map(|f| f.speed_multiplier), Some(0.2));

        game.set_speed_mode(false);
        game.advance();
        assert_eq!(game.tick_delay().as_millis(), 750);
    }

    #[test]
    fn resize_is_locked_after_ticking() {
        let mut game = game_with(
            Snake::new(Position::new(0, 0), Direction::Up),
            Vec::new(),
            8,
            8,
        );

        assert!(matches!(
            game.set_size(0, 4),
            Err(EngineError::InvalidGrid { .. })
        ));
        game.set_size(16, 16).expect("resize before ticking is allowed");
        assert_eq!(game.bounds().width, 16);

        game.tick(1.0).expect("tick should succeed");
        assert!(matches!(game.set_size(4, 4), Err(EngineError::GridLocked)));
    }

    #[test]
    fn saturated_grid_skips_replacement() {
        let snake = Snake::new(Position::new(0, 0), Direction::Right);
        let mut game = game_with(snake, vec![Food::new(0, Position::new(1, 0))], 2, 1);

        let outcome = game.advance();

        assert!(matches!(outcome, TickOutcome::Ate { .. }));
        assert_eq!(game.snake().map(Snake::len), Some(2));
        assert!(game.foods().is_empty());
    }

    #[test]
    fn from_config_places_initial_food_off_the_snake() {
        let game = Game::from_config(Vec::new(), &config(16, 16));
        let snake = game.snake().expect("config snake is assigned");

        assert_eq!(snake.len(), 3);
        assert_eq!(game.foods().len(), 4);
        for (index, food) in game.foods().iter().enumerate() {
            assert_eq!(food.id, index);
            assert!(!snake.occupies(food.position));
        }
    }
}
