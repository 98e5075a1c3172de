//! Renderers that need no terminal: frame streaming and state tracking.

use std::io::Write;

use log::info;

use crate::error::RenderError;
use crate::frame::{Frame, GameDescription};
use crate::renderer::{Capabilities, Renderer};

/// Writes every frame as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-lines"
    }
}

/// Separator between the fields of a state string.
pub const STATE_SEPARATOR: &str = "::";

/// Tracks a compact `"<level>::<score>"` state string and reports it only
/// when it changes.
#[derive(Debug, Default)]
pub struct StateParamRenderer {
    state: Option<String>,
    changes: usize,
}

impl StateParamRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest state string, if any frame was rendered.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Number of distinct state transitions observed.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.changes
    }
}

/// Formats the state string for a level and score.
#[must_use]
pub fn state_string(level: u32, score: f64) -> String {
    format!("{level}{STATE_SEPARATOR}{score}")
}

impl Renderer for StateParamRenderer {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let next = state_string(frame.level, frame.score);
        if self.state.as_deref() == Some(next.as_str()) {
            return Ok(());
        }

        info!("state changed to {next}");
        self.state = Some(next);
        self.changes += 1;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            init: true,
            ..Capabilities::RENDER_ONLY
        }
    }

    fn name(&self) -> &'static str {
        "state-param"
    }

    fn init(&mut self, game: &GameDescription) {
        info!(
            "tracking state on a {}x{} grid",
            game.size.width, game.size.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonLinesRenderer, StateParamRenderer, state_string};
    use crate::frame::Frame;
    use crate::input::Direction;
    use crate::renderer::Renderer;

    fn frame(level: u32, score: f64) -> Frame {
        Frame {
            timestamp: 16.0,
            snake: None,
            food: Vec::new(),
            score,
            level,
            direction: Direction::Left,
            speed_multiplier: 1.0,
        }
    }

    #[test]
    fn json_lines_writes_one_object_per_frame() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());

        renderer.render(&frame(1, 0.0)).expect("write to vec");
        renderer.render(&frame(2, 10.0)).expect("write to vec");

        let out = String::from_utf8(renderer.into_inner()).expect("utf8 output");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value =
            serde_json::from_str(lines[1]).expect("line is json");
        assert_eq!(second["level"], 2);
        assert_eq!(second["direction"], "left");
        assert_eq!(second["speedMultiplier"], 1.0);
        assert!(second["snake"].is_null());
    }

    #[test]
    fn state_is_reported_only_on_change() {
        let mut renderer = StateParamRenderer::new();

        renderer.render(&frame(1, 0.0)).expect("infallible");
        renderer.render(&frame(1, 0.0)).expect("infallible");
        renderer.render(&frame(1, 2.0)).expect("infallible");

        assert_eq!(renderer.changes(), 2);
        assert_eq!(renderer.state(), Some("1::2"));
        assert_eq!(state_string(3, 20.0), "3::20");
    }
}
