use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use thiserror::Error;
use wrap_snake::config::GameConfig;
use wrap_snake::data::FoodFeed;
use wrap_snake::error::{ConfigError, DataError, EngineError};
use wrap_snake::game::{Game, TickOutcome};
use wrap_snake::headless::{JsonLinesRenderer, StateParamRenderer};
use wrap_snake::input::{InputAction, InputAdapter};
use wrap_snake::renderer::Renderer;
use wrap_snake::terminal_runtime::{TerminalGuard, restore_terminal};
use wrap_snake::ui::TerminalRenderer;

const APP_DIR_NAME: &str = "wrap-snake";
const LOG_FILE_NAME: &str = "wrap-snake.log";

/// Poll interval while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u16>,
    #[arg(long)]
    height: Option<u16>,
    /// Normal tick interval in milliseconds.
    #[arg(long = "speed")]
    speed_ms: Option<f64>,
    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON array of `{x, y, color?}` rows seeding the grid size and food.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Stream frames as JSON lines to stdout instead of drawing a board.
    #[arg(long)]
    headless: bool,
    /// Number of moving ticks to run in headless mode.
    #[arg(long, default_value_t = 100)]
    ticks: u64,
    /// Start immediately instead of showing the start screen.
    #[arg(long)]
    autostart: bool,
    /// Log file for interactive mode (headless mode logs to stderr).
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("cannot install logger: {0}")]
    Logger(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("fatal: {error}");
            eprintln!("wrap-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    init_logging(cli)?;
    let config = load_config(cli)?;
    info!(
        "starting on a {}x{} grid, {} ms per tick",
        config.grid.width, config.grid.height, config.speed_ms
    );

    if cli.headless {
        run_headless(cli, &config)
    } else {
        run_interactive(cli, &config)
    }
}

fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let level = LevelFilter::from(cli.log_level);

    let installed = if cli.headless {
        WriteLogger::init(level, Config::default(), io::stderr())
    } else {
        let path = cli.log_file.clone().unwrap_or_else(default_log_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        WriteLogger::init(level, Config::default(), File::create(&path)?)
    };

    installed.map_err(|error| AppError::Logger(error.to_string()))
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

fn load_config(cli: &Cli) -> Result<GameConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(speed_ms) = cli.speed_ms {
        config.speed_ms = speed_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

fn build_game(
    renderers: Vec<Box<dyn Renderer>>,
    config: &GameConfig,
    data: Option<&Path>,
) -> Result<Game, AppError> {
    let mut game = match data {
        Some(path) => {
            let feed = FoodFeed::load(path)?;
            config.snake.check_fits(feed.size)?;
            let mut game = Game::new(renderers, Some(config.snake.build()), Vec::new(), config);
            feed.apply(&mut game)?;
            game
        }
        None => Game::from_config(renderers, config),
    };

    game.init_engines()?;
    Ok(game)
}

fn run_headless(cli: &Cli, config: &GameConfig) -> Result<(), AppError> {
    let renderers: Vec<Box<dyn Renderer>> = vec![
        Box::new(JsonLinesRenderer::new(io::stdout())),
        Box::new(StateParamRenderer::new()),
    ];
    let mut game = build_game(renderers, config, cli.data.as_deref())?;
    game.start_game()?;

    // Simulated clock: each tick is stamped one tick delay after the last.
    let mut timestamp = 0.0;
    for _ in 0..=cli.ticks {
        tick_logged(&mut game, timestamp)?;
        timestamp += game.tick_delay().as_secs_f64() * 1000.0;
    }

    game.stop();
    info!(
        "headless run finished: score {}, level {}, eaten {}",
        game.score(),
        game.level(),
        game.eaten()
    );
    Ok(())
}

fn run_interactive(cli: &Cli, config: &GameConfig) -> Result<(), AppError> {
    let guard = TerminalGuard::enter()?;
    install_panic_hook(guard.has_key_releases());

    let renderers: Vec<Box<dyn Renderer>> = vec![
        Box::new(TerminalRenderer::new(guard.terminal()?)),
        Box::new(StateParamRenderer::new()),
    ];
    let mut game = build_game(renderers, config, cli.data.as_deref())?;

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1000.0;

    if cli.autostart {
        game.start_game()?;
    } else {
        game.screen_game_start();
        log_render_failures(game.preview(now_ms()))?;
    }

    let mut input = InputAdapter::new();
    let mut next_tick = Instant::now();

    loop {
        let timeout = if game.is_running() {
            next_tick.saturating_duration_since(Instant::now())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    for action in input.translate(key) {
                        if action == InputAction::Quit {
                            game.stop();
                            return Ok(());
                        }

                        let was_running = game.is_running();
                        game.apply_input(action)?;

                        if !was_running && game.is_running() {
                            next_tick = Instant::now();
                        }
                        if action == InputAction::Stop {
                            log_render_failures(game.run_frame(now_ms()))?;
                        }
                    }
                }
                Event::Resize(..) => log_render_failures(game.run_frame(now_ms()))?,
                _ => {}
            }
        }

        if game.is_running() && Instant::now() >= next_tick {
            tick_logged(&mut game, now_ms())?;
            next_tick = Instant::now() + game.tick_delay();
        }
    }
}

/// Runs one tick; render failures are logged and do not end the run.
fn tick_logged(game: &mut Game, timestamp: f64) -> Result<(), EngineError> {
    match game.tick(timestamp) {
        Ok(TickOutcome::Ate { food, .. }) => {
            info!(
                "ate food #{} at ({}, {}), score {}",
                food.id,
                food.position.x,
                food.position.y,
                game.score()
            );
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(error) => log_render_failures(Err(error)),
    }
}

fn log_render_failures(result: Result<(), EngineError>) -> Result<(), EngineError> {
    match result {
        Err(EngineError::Render { failures }) => {
            for failure in &failures {
                error!("{failure}");
            }
            Ok(())
        }
        other => other,
    }
}

fn install_panic_hook(enhanced_keys: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(enhanced_keys);
        default_hook(panic_info);
    }));
}
