//! Terminal presentation: the ratatui board renderer and its HUD.

pub mod board;
pub mod hud;
pub mod menu;

pub use board::TerminalRenderer;
