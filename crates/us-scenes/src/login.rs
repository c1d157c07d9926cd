//! Terminal login scene.
//!
//! Asks for a user name and password until they match the credentials kept
//! in the game state under `user.username` and `user.password`.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};
use us_core::{CoreResult, Echo, GameState, Scene, Stage, Transition};

use crate::script::{Beat, scene_for};

const DEFAULT_BANNER: &str = "Ether Industry EtherOS v6.2.4 (black-hole-01) (tty1)";
const LOGIN_PROMPT: &str = "Login: ";
const PASSWORD_PROMPT: &str = "Password: ";

/// A login screen guarding the rest of the story.
#[derive(Debug, Clone)]
pub struct LoginScene {
    banner: String,
    rest: VecDeque<Beat>,
}

impl Default for LoginScene {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScene {
    /// Create a login scene with the stock banner.
    pub fn new() -> Self {
        Self {
            banner: DEFAULT_BANNER.to_string(),
            rest: VecDeque::new(),
        }
    }

    /// Replace the banner line.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Continue with these beats afterwards.
    pub fn then(mut self, rest: VecDeque<Beat>) -> Self {
        self.rest = rest;
        self
    }
}

impl Scene for LoginScene {
    fn name(&self) -> &str {
        "login"
    }

    fn start(&mut self, stage: &mut Stage<'_>, state: &mut GameState) -> CoreResult<Transition> {
        stage.flush_input()?;
        let expected_username = state.get_str("user.username")?.to_string();
        let expected_password = state.get_str("user.password")?.to_string();

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            stage.clear()?;
            stage.place(1, 1, &self.banner)?;

            let username = stage.prompt(1, 3, LOGIN_PROMPT, Echo::Visible)?;
            let password = stage.prompt(1, 4, PASSWORD_PROMPT, Echo::Masked)?;
            stage.pause(Duration::from_millis(200));

            if username == expected_username && password == expected_password {
                stage.place(1, 5, &format!("Last login: {}", state.last_save_label()))?;
                info!(attempts, "logged in");
                break;
            }

            debug!(attempts, username = %username, "login incorrect");
            stage.place(1, 5, "Login incorrect.")?;
            stage.pause(Duration::from_secs(1));
        }

        Ok(match scene_for(std::mem::take(&mut self.rest)) {
            Some(next) => Transition::Next(next),
            None => Transition::End,
        })
    }
}
