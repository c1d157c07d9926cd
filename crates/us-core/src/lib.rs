//! Scene engine core for Universal Sandbox.
//!
//! Defines the renderer boundary a terminal backend has to provide, the
//! [`Stage`] that scenes draw through (centred text reveal with paging and
//! key-press skipping), the [`Scene`] trait with its [`Director`], and the
//! persisted [`GameState`] store.

/// Reveal configuration defaults.
pub mod config;
/// Error types for the scene engine.
pub mod error;
/// Renderer boundary: viewport, keys, and the drawing capability trait.
pub mod render;
/// Paging and centring arithmetic for text reveal.
pub mod reveal;
/// Scene trait, transitions, and the scene director.
pub mod scene;
/// Renderer with a synthetic clock and scripted key presses.
#[cfg(any(test, feature = "testing"))]
pub mod scripted;
/// Scene-facing drawing helpers.
pub mod stage;
/// Persisted game state.
pub mod state;

pub use config::RevealConfig;
pub use error::{CoreError, CoreResult};
pub use render::{Key, Renderer, Viewport};
pub use reveal::{PAGE_OVERLAP, Pacing};
pub use scene::{Director, Scene, Transition};
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedRenderer;
pub use stage::{Echo, Stage};
pub use state::GameState;
