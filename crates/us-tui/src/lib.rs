//! Terminal frontend for Universal Sandbox.
//!
//! Implements the [`us_core::Renderer`] boundary on top of ratatui and
//! crossterm, and owns terminal setup, teardown, and log output.

pub mod backend;
pub mod logging;
pub mod terminal;
