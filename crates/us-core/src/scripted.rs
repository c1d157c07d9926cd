//! A [`Renderer`] that never touches a terminal.
//!
//! Time is synthetic: waits advance an internal clock instead of sleeping,
//! and key presses are scheduled at fixed points on that clock. Every draw
//! call is recorded, and a character grid mirrors what a real screen would
//! show, so scenes can be driven and inspected deterministically.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::error::CoreResult;
use crate::render::{Key, Renderer, Viewport};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// `place_text` was called.
    Place {
        /// Column of the first character.
        column: u16,
        /// Row of the run.
        row: u16,
        /// The text placed.
        text: String,
    },
    /// `refresh` was called.
    Refresh,
    /// `clear_and_redraw_borders` was called.
    Clear,
}

/// Renderer with a synthetic clock and a scripted key sequence.
#[derive(Debug, Clone)]
pub struct ScriptedRenderer {
    viewport: Viewport,
    clock: Duration,
    keys: VecDeque<(Duration, Key)>,
    ops: Vec<DrawOp>,
    waits: Vec<Duration>,
    grid: Vec<Vec<char>>,
}

impl ScriptedRenderer {
    /// Create a renderer with the given viewport and no scripted keys.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            clock: Duration::ZERO,
            keys: VecDeque::new(),
            ops: Vec::new(),
            waits: Vec::new(),
            grid: blank_grid(width, height),
        }
    }

    /// Schedule a key press at `at` on the synthetic clock.
    pub fn with_key_at(mut self, at: Duration, key: Key) -> Self {
        let index = self.keys.partition_point(|(time, _)| *time <= at);
        self.keys.insert(index, (at, key));
        self
    }

    /// Schedule `line` followed by Enter, typed at `at`.
    pub fn with_line_at(mut self, at: Duration, line: &str) -> Self {
        for c in line.chars() {
            self = self.with_key_at(at, Key::Char(c));
        }
        self.with_key_at(at, Key::Enter)
    }

    /// Current synthetic time.
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Every recorded call, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every `place_text` call as `(column, row, text)`.
    pub fn placed(&self) -> Vec<(u16, u16, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Place { column, row, text } => Some((*column, *row, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Texts of every `place_text` call.
    pub fn placed_texts(&self) -> Vec<&str> {
        self.placed().into_iter().map(|(_, _, text)| text).collect()
    }

    /// Timeouts passed to `wait_key_or_timeout`, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Number of screen clears.
    pub fn clears(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Clear).count()
    }

    /// Scripted keys not consumed yet.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Visible content of a row, without trailing blanks.
    pub fn row_text(&self, row: u16) -> String {
        self.grid
            .get(usize::from(row))
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Whether `needle` is visible anywhere on screen.
    pub fn screen_contains(&self, needle: &str) -> bool {
        (0..self.viewport.height).any(|row| self.row_text(row).contains(needle))
    }
}

fn blank_grid(width: u16, height: u16) -> Vec<Vec<char>> {
    vec![vec![' '; usize::from(width)]; usize::from(height)]
}

impl Renderer for ScriptedRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn place_text(&mut self, column: u16, row: u16, text: &str) -> CoreResult<()> {
        if let Some(cells) = self.grid.get_mut(usize::from(row)) {
            for (cell, c) in cells.iter_mut().skip(usize::from(column)).zip(text.chars()) {
                *cell = c;
            }
        }
        self.ops.push(DrawOp::Place {
            column,
            row,
            text: text.to_string(),
        });
        Ok(())
    }

    fn refresh(&mut self) -> CoreResult<()> {
        self.ops.push(DrawOp::Refresh);
        Ok(())
    }

    fn clear_and_redraw_borders(&mut self) -> CoreResult<()> {
        self.grid = blank_grid(self.viewport.width, self.viewport.height);
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn wait_key_or_timeout(&mut self, timeout: Duration) -> CoreResult<Option<Key>> {
        self.waits.push(timeout);
        let deadline = self.clock + timeout;
        match self.keys.front() {
            Some((at, _)) if *at <= deadline => {
                let (at, key) = self.keys.pop_front().unwrap_or((deadline, Key::Other));
                self.clock = self.clock.max(at);
                Ok(Some(key))
            }
            _ => {
                self.clock = deadline;
                Ok(None)
            }
        }
    }

    fn read_key(&mut self) -> CoreResult<Key> {
        let (at, key) = self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted key left")
        })?;
        self.clock = self.clock.max(at);
        Ok(key)
    }

    fn pause(&mut self, duration: Duration) {
        self.clock += duration;
    }

    fn flush_input(&mut self) -> CoreResult<()> {
        let now = self.clock;
        self.keys.retain(|(at, _)| *at >= now);
        Ok(())
    }
}
