//! Renderer boundary between scenes and a concrete display.

use std::time::Duration;

use crate::error::CoreResult;

/// Rows taken by the top and bottom border.
const BORDER_ROWS: u16 = 2;

/// Size of the visible character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Number of columns.
    pub width: u16,
    /// Number of rows, borders included.
    pub height: u16,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// How many text lines fit between the borders (at least one).
    pub fn text_rows(self) -> usize {
        usize::from(self.height.saturating_sub(BORDER_ROWS).max(1))
    }
}

/// A key press as seen by scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Return / Enter.
    Enter,
    /// Backspace.
    Backspace,
    /// Escape.
    Esc,
    /// Any other key.
    Other,
}

/// Capabilities a display backend offers to scenes.
///
/// Access is exclusive: one scene drives the renderer at a time.
pub trait Renderer {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Write a run of characters starting at the given cell.
    ///
    /// Clipping text that does not fit is up to the renderer.
    fn place_text(&mut self, column: u16, row: u16, text: &str) -> CoreResult<()>;

    /// Make every placed run visible.
    fn refresh(&mut self) -> CoreResult<()>;

    /// Erase all text, leaving only the border frame.
    fn clear_and_redraw_borders(&mut self) -> CoreResult<()>;

    /// Block until a key is pressed or `timeout` elapses.
    ///
    /// Returns `None` when the timeout elapsed without a key press.
    fn wait_key_or_timeout(&mut self, timeout: Duration) -> CoreResult<Option<Key>>;

    /// Block until a key is pressed.
    fn read_key(&mut self) -> CoreResult<Key>;

    /// Sleep without reacting to key presses.
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    /// Drop key presses that arrived before now.
    fn flush_input(&mut self) -> CoreResult<()> {
        Ok(())
    }
}
