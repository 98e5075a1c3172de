use log::{trace, warn};

use crate::error::{RenderError, RenderFailure};
use crate::food::Food;
use crate::frame::{Frame, GameDescription};

/// Optional hooks a renderer opts into. `render` is always called.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Capabilities {
    /// Receives `init` once before the first frame.
    pub init: bool,
    /// Receives `hover_datapoint` / `hover_out`.
    pub hover: bool,
    /// Receives `start_game`, `stop_game` and `screen_game_start`.
    pub lifecycle: bool,
}

impl Capabilities {
    /// Only `render`.
    pub const RENDER_ONLY: Self = Self {
        init: false,
        hover: false,
        lifecycle: false,
    };

    /// Every optional hook.
    pub const ALL: Self = Self {
        init: true,
        hover: true,
        lifecycle: true,
    };
}

/// Collaborator that consumes frames produced by the engine.
///
/// Hooks other than `render` have no-op defaults and are only invoked when the
/// matching flag in [`Renderer::capabilities`] is set.
pub trait Renderer {
    /// Draws one frame. Called once per tick, in registration order.
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDER_ONLY
    }

    /// Short name used in logs and failure reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn init(&mut self, _game: &GameDescription) {}

    fn hover_datapoint(&mut self, _food: &Food, _x: f64, _y: f64) {}

    fn hover_out(&mut self, _food: &Food) {}

    fn start_game(&mut self) {}

    fn stop_game(&mut self) {}

    fn screen_game_start(&mut self) {}
}

/// Ordered set of renderers owned by the engine.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RendererRegistry {
    #[must_use]
    pub fn new(renderers: Vec<Box<dyn Renderer>>) -> Self {
        Self { renderers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn init(&mut self, game: &GameDescription) {
        for renderer in self.with(|caps| caps.init) {
            renderer.init(game);
        }
    }

    /// Renders `frame` on every renderer and returns the failures.
    ///
    /// A failing renderer does not stop delivery to the ones after it.
    pub fn render(&mut self, frame: &Frame) -> Vec<RenderFailure> {
        let mut failures = Vec::new();

        for (index, renderer) in self.renderers.iter_mut().enumerate() {
            trace!("rendering frame {} on {}", frame.timestamp, renderer.name());
            if let Err(error) = renderer.render(frame) {
                warn!("renderer #{index} ({}) failed: {error}", renderer.name());
                failures.push(RenderFailure {
                    index,
                    name: renderer.name(),
                    error,
                });
            }
        }

        failures
    }

    pub fn hover_datapoint(&mut self, food: &Food, x: f64, y: f64) {
        for renderer in self.with(|caps| caps.hover) {
            renderer.hover_datapoint(food, x, y);
        }
    }

    pub fn hover_out(&mut self, food: &Food) {
        for renderer in self.with(|caps| caps.hover) {
            renderer.hover_out(food);
        }
    }

    pub fn start_game(&mut self) {
        for renderer in self.with(|caps| caps.lifecycle) {
            renderer.start_game();
        }
    }

    pub fn stop_game(&mut self) {
        for renderer in self.with(|caps| caps.lifecycle) {
            renderer.stop_game();
        }
    }

    pub fn screen_game_start(&mut self) {
        for renderer in self.with(|caps| caps.lifecycle) {
            renderer.screen_game_start();
        }
    }

    fn with(
        &mut self,
        wanted: impl Fn(Capabilities) -> bool,
    ) -> impl Iterator<Item = &mut Box<dyn Renderer>> {
        self.renderers
            .iter_mut()
            .filter(move |renderer| wanted(renderer.capabilities()))
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.renderers.iter().map(|renderer| renderer.name()))
            .finish()
    }
}
