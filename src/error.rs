use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the simulation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("renderers are not initialized yet, call `init_engines` first")]
    EnginesNotInitialized,
    #[error("renderers were already initialized")]
    AlreadyInitialized,
    #[error("grid must be non-empty, got {width}x{height}")]
    InvalidGrid { width: u16, height: u16 },
    #[error("grid size cannot change once the engine has started ticking")]
    GridLocked,
    #[error("{} renderer(s) failed to render the frame", failures.len())]
    Render { failures: Vec<RenderFailure> },
}

/// Failure reported by a renderer collaborator.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render surface is missing: {0}")]
    SurfaceMissing(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One collaborator's render failure for a single frame.
#[derive(Debug)]
pub struct RenderFailure {
    /// Registration index of the collaborator.
    pub index: usize,
    pub name: &'static str,
    pub error: RenderError,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "renderer #{} ({}): {}", self.index, self.name, self.error)
    }
}

/// Failure while loading or validating a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure while reading an external food data feed.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read data feed {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed data feed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("row {row} has a non-finite or negative coordinate")]
    BadCoordinate { row: usize },
}
