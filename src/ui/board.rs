use std::str::FromStr;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use crate::config::GridSize;
use crate::error::RenderError;
use crate::food::Food;
use crate::frame::{Frame as GameFrame, GameDescription};
use crate::grid::Position;
use crate::input::Direction;
use crate::renderer::{Capabilities, Renderer};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_start_menu, render_stopped_menu};

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▓";
pub const GLYPH_FOOD: &str = "●";

const DEFAULT_FOOD_COLOR: Color = Color::Red;

/// Popup drawn over the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    None,
    StartScreen,
    Stopped,
}

/// Renders frames onto a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    bounds: Option<GridSize>,
    overlay: Overlay,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            bounds: None,
            overlay: Overlay::None,
        }
    }

    #[must_use]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, game_frame: &GameFrame) -> Result<(), RenderError> {
        let Some(bounds) = self.bounds else {
            return Err(RenderError::SurfaceMissing(
                "board size unknown, renderer was never initialized".to_owned(),
            ));
        };
        let overlay = self.overlay;

        self.terminal
            .draw(|frame| draw(frame, game_frame, bounds, overlay))?;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            hover: false,
            ..Capabilities::ALL
        }
    }

    fn name(&self) -> &'static str {
        "terminal"
    }

    fn init(&mut self, game: &GameDescription) {
        self.bounds = Some(game.size);
    }

    fn start_game(&mut self) {
        self.overlay = Overlay::None;
    }

    fn stop_game(&mut self) {
        self.overlay = Overlay::Stopped;
    }

    fn screen_game_start(&mut self) {
        self.overlay = Overlay::StartScreen;
    }
}

fn draw(frame: &mut Frame<'_>, game_frame: &GameFrame, bounds: GridSize, overlay: Overlay) {
    let area = frame.area();
    let board_area = render_hud(frame, area, game_frame);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, bounds, &game_frame.food);
    render_snake(frame, inner, bounds, game_frame);

    match overlay {
        Overlay::StartScreen => render_start_menu(frame, board_area),
        Overlay::Stopped => render_stopped_menu(frame, board_area, game_frame.score),
        Overlay::None => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, foods: &[Food]) {
    let buffer = frame.buffer_mut();
    for food in foods {
        let Some((x, y)) = logical_to_terminal(inner, bounds, food.position) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(food_color(food)));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, game_frame: &GameFrame) {
    let Some(snake) = game_frame.snake.as_ref() else {
        return;
    };
    let last = snake.len() - 1;

    let buffer = frame.buffer_mut();
    // Tail first so the head wins when segments overlap.
    for (index, segment) in snake.segments().iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        let (glyph, style) = match index {
            0 => (
                head_glyph(snake.facing()),
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            i if i == last => (GLYPH_SNAKE_TAIL, Style::new().fg(Color::DarkGray)),
            _ => (GLYPH_SNAKE_BODY, Style::new().fg(Color::Green)),
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn food_color(food: &Food) -> Color {
    food.color
        .as_deref()
        .and_then(|tag| Color::from_str(tag).ok())
        .unwrap_or(DEFAULT_FOOD_COLOR)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a logical cell to a terminal cell. Row 0 is drawn at the bottom.
fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = bounds.height - 1 - u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
