use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::frame::Frame as GameFrame;

/// Splits `area` into the board and a two-line HUD below it, draws the HUD
/// and returns the board area.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game_frame: &GameFrame) -> Rect {
    let [board_area, stats_area, help_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(game_frame)).alignment(Alignment::Right),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from("arrows/wasd/hjkl move · shift turbo · esc stop · q quit"))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    board_area
}

fn stats_line(game_frame: &GameFrame) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (name, text) in [
        ("Score", game_frame.score.to_string()),
        ("Level", game_frame.level.to_string()),
        ("Length", game_frame.snake_len().to_string()),
        ("Speed", format!("x{:.2}", game_frame.speed_multiplier)),
    ] {
        spans.push(Span::styled(format!(" {name} "), label));
        spans.push(Span::styled(text, value));
    }

    Line::from(spans)
}
