//! Narrative text scene.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;
use us_core::{CoreResult, GameState, Scene, Stage, Transition};

use crate::script::{Beat, scene_for};

/// Reveals a block of text centred on screen, then holds it.
#[derive(Debug, Clone)]
pub struct StoryScene {
    text: String,
    delay: Option<Duration>,
    pager_delay: Option<Duration>,
    hold: Option<Duration>,
    rest: VecDeque<Beat>,
}

impl StoryScene {
    /// Create a story scene with the director's default pacing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: None,
            pager_delay: None,
            hold: None,
            rest: VecDeque::new(),
        }
    }

    /// Override the pause between lines.
    pub fn with_delay(mut self, delay: Option<Duration>) -> Self {
        self.delay = delay;
        self
    }

    /// Override the pause between pages.
    pub fn with_pager_delay(mut self, delay: Option<Duration>) -> Self {
        self.pager_delay = delay;
        self
    }

    /// Override how long the finished text stays up (defaults to the pager delay).
    pub fn with_hold(mut self, hold: Option<Duration>) -> Self {
        self.hold = hold;
        self
    }

    /// Continue with these beats afterwards.
    pub fn then(mut self, rest: VecDeque<Beat>) -> Self {
        self.rest = rest;
        self
    }
}

impl Scene for StoryScene {
    fn name(&self) -> &str {
        "story"
    }

    fn start(&mut self, stage: &mut Stage<'_>, _state: &mut GameState) -> CoreResult<Transition> {
        let config = stage.config();
        let delay = self.delay.unwrap_or(config.line_delay);
        let pager_delay = self.pager_delay.unwrap_or(config.pager_delay);

        let skipped = stage.reveal_all_centred(&self.text, delay, pager_delay)?;
        debug!(skipped, lines = self.text.lines().count(), "story revealed");

        // an unpaced reveal always reports a skip; only a real key press cuts the hold
        let interrupted = skipped && !delay.is_zero();
        if !interrupted {
            stage.sleep_key(self.hold.unwrap_or(pager_delay))?;
        }

        Ok(match scene_for(std::mem::take(&mut self.rest)) {
            Some(next) => Transition::Next(next),
            None => Transition::End,
        })
    }
}
