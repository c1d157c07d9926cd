//! Scenes and the director that plays them in sequence.

use tracing::{debug, info};

use crate::config::RevealConfig;
use crate::error::CoreResult;
use crate::render::Renderer;
use crate::stage::Stage;
use crate::state::GameState;

/// What happens after a scene finishes.
pub enum Transition {
    /// Play this scene next.
    Next(Box<dyn Scene>),
    /// The story is over.
    End,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Next(scene) => write!(f, "Next({})", scene.name()),
            Self::End => write!(f, "End"),
        }
    }
}

/// One screen of the story.
pub trait Scene {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run the scene to completion and pick the next one.
    fn start(&mut self, stage: &mut Stage<'_>, state: &mut GameState) -> CoreResult<Transition>;
}

/// Plays scenes one after another until one ends the story.
#[derive(Debug, Clone, Default)]
pub struct Director {
    config: RevealConfig,
}

impl Director {
    /// Create a director that hands `config` to every scene.
    pub fn new(config: RevealConfig) -> Self {
        Self { config }
    }

    /// Play `first` and everything it leads to. Returns how many scenes ran.
    ///
    /// The screen is cleared before each scene.
    pub fn run(
        &self,
        renderer: &mut dyn Renderer,
        state: &mut GameState,
        first: Box<dyn Scene>,
    ) -> CoreResult<usize> {
        let mut stage = Stage::new(renderer, self.config);
        let mut scene = first;
        let mut played = 0;
        loop {
            debug!(scene = scene.name(), "scene start");
            stage.clear()?;
            let transition = scene.start(&mut stage, state)?;
            played += 1;
            debug!(scene = scene.name(), next = ?transition, "scene end");
            match transition {
                Transition::Next(next) => scene = next,
                Transition::End => break,
            }
        }
        info!(scenes = played, "story finished");
        Ok(played)
    }
}
