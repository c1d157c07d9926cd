//! Concrete scenes for Universal Sandbox.
//!
//! A scene script is a JSON list of beats (story text, a login screen,
//! pauses). [`Script::into_scene`] turns the beats into a chain of scenes
//! that the [`us_core::Director`] plays in order.

pub mod error;
pub mod login;
pub mod pause;
pub mod script;
pub mod story;

pub use error::{ScriptError, ScriptResult};
pub use login::LoginScene;
pub use pause::PauseScene;
pub use script::{Beat, Script};
pub use story::StoryScene;
