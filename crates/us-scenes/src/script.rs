//! Scene scripts: the ordered beats of a story.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use us_core::Scene;

use crate::error::{ScriptError, ScriptResult};
use crate::login::LoginScene;
use crate::pause::PauseScene;
use crate::story::StoryScene;

/// One step of a script.
///
/// Durations are in seconds. Omitted pacing falls back to the director's
/// [`RevealConfig`](us_core::RevealConfig).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Beat {
    /// Narrative text revealed in the middle of the screen.
    Story {
        /// The text, one screen line per line.
        text: String,
        /// Pause between lines.
        #[serde(default)]
        delay: Option<f64>,
        /// Pause between pages.
        #[serde(default)]
        pager_delay: Option<f64>,
        /// How long the finished text stays up.
        #[serde(default)]
        hold: Option<f64>,
    },
    /// A login prompt checked against the saved credentials.
    Login {
        /// Banner line shown above the prompts.
        #[serde(default)]
        banner: Option<String>,
    },
    /// An empty screen.
    Pause {
        /// How long to wait.
        seconds: f64,
    },
}

/// A parsed scene script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Title of the story.
    #[serde(default)]
    pub title: Option<String>,
    /// Beats in play order.
    pub beats: Vec<Beat>,
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        if script.beats.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> ScriptResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build the scene for the first beat; each scene leads to the next.
    pub fn into_scene(self) -> Option<Box<dyn Scene>> {
        scene_for(self.beats.into())
    }
}

/// The scene for the front beat of `beats`, carrying the rest along.
pub(crate) fn scene_for(mut beats: VecDeque<Beat>) -> Option<Box<dyn Scene>> {
    let beat = beats.pop_front()?;
    let scene: Box<dyn Scene> = match beat {
        Beat::Story {
            text,
            delay,
            pager_delay,
            hold,
        } => Box::new(
            StoryScene::new(text)
                .with_delay(delay.map(us_core::config::secs))
                .with_pager_delay(pager_delay.map(us_core::config::secs))
                .with_hold(hold.map(us_core::config::secs))
                .then(beats),
        ),
        Beat::Login { banner } => {
            let scene = match banner {
                Some(banner) => LoginScene::new().with_banner(banner),
                None => LoginScene::new(),
            };
            Box::new(scene.then(beats))
        }
        Beat::Pause { seconds } => {
            Box::new(PauseScene::new(us_core::config::secs(seconds)).then(beats))
        }
    };
    Some(scene)
}
