//! Blank interlude scene.

use std::collections::VecDeque;
use std::time::Duration;

use us_core::{CoreResult, GameState, Scene, Stage, Transition};

use crate::script::{Beat, scene_for};

/// Leaves the screen empty for a while; a key press cuts it short.
#[derive(Debug, Clone)]
pub struct PauseScene {
    duration: Duration,
    rest: VecDeque<Beat>,
}

impl PauseScene {
    /// Create a pause of the given length.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            rest: VecDeque::new(),
        }
    }

    /// Continue with these beats afterwards.
    pub fn then(mut self, rest: VecDeque<Beat>) -> Self {
        self.rest = rest;
        self
    }
}

impl Scene for PauseScene {
    fn name(&self) -> &str {
        "pause"
    }

    fn start(&mut self, stage: &mut Stage<'_>, _state: &mut GameState) -> CoreResult<Transition> {
        stage.refresh()?;
        stage.sleep_key(self.duration)?;
        Ok(match scene_for(std::mem::take(&mut self.rest)) {
            Some(next) => Transition::Next(next),
            None => Transition::End,
        })
    }
}
