//! Wraparound Snake simulation engine.
//!
//! [`game::Game`] owns the state and advances it one tick at a time; every
//! tick produces an immutable [`frame::Frame`] that is handed to the
//! registered [`renderer::Renderer`]s in order.

pub mod config;
pub mod data;
pub mod error;
pub mod food;
pub mod frame;
pub mod game;
pub mod grid;
pub mod headless;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
