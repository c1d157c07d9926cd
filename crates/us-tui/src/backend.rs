//! ratatui/crossterm implementation of the renderer boundary.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Block;
use us_core::{CoreResult, Key, Renderer, Viewport};

/// A run of text at a fixed cell.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextRun {
    column: u16,
    row: u16,
    text: String,
}

/// Everything placed since the last clear, drawn inside a border.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    runs: Vec<TextRun>,
}

impl Canvas {
    /// Add a run; a run at the same cell replaces the previous one.
    pub fn place(&mut self, column: u16, row: u16, text: &str) {
        self.runs.retain(|run| run.column != column || run.row != row);
        self.runs.push(TextRun {
            column,
            row,
            text: text.to_string(),
        });
    }

    /// Forget every run.
    pub fn clear(&mut self) {
        self.runs.clear();
    }

    /// Number of runs on the canvas.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .render(area, buf);

        for run in &self.runs {
            if run.row >= area.height || run.column >= area.width {
                continue;
            }
            let room = usize::from(area.width - run.column);
            buf.set_stringn(
                area.x + run.column,
                area.y + run.row,
                &run.text,
                room,
                Style::default(),
            );
        }
    }
}

/// Draws scenes to a ratatui terminal and reads keys from crossterm.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    canvas: Canvas,
    viewport: Viewport,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Wrap an initialised terminal.
    pub fn new(terminal: Terminal<B>) -> io::Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            canvas: Canvas::default(),
            viewport: Viewport::new(size.width, size.height),
        })
    }

    /// Hide the terminal cursor while scenes run.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.terminal.hide_cursor()
    }

    /// Give back the terminal, e.g. for teardown.
    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }

    fn draw(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        self.viewport = Viewport::new(size.width, size.height);
        let canvas = &self.canvas;
        self.terminal
            .draw(|frame| frame.render_widget(canvas, frame.area()))?;
        Ok(())
    }

    /// Handle a terminal event; returns the key if it was a key press.
    fn on_event(&mut self, event: Event) -> CoreResult<Option<Key>> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => translate(key).map(Some),
            Event::Resize(width, height) => {
                self.viewport = Viewport::new(width, height);
                self.terminal.autoresize()?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Map a crossterm key to a scene key. Ctrl+C always quits.
fn translate(key: KeyEvent) -> CoreResult<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by user").into());
    }
    Ok(match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    })
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn place_text(&mut self, column: u16, row: u16, text: &str) -> CoreResult<()> {
        self.canvas.place(column, row, text);
        Ok(())
    }

    fn refresh(&mut self) -> CoreResult<()> {
        Ok(self.draw()?)
    }

    fn clear_and_redraw_borders(&mut self) -> CoreResult<()> {
        self.canvas.clear();
        self.terminal.clear()?;
        Ok(self.draw()?)
    }

    fn wait_key_or_timeout(&mut self, timeout: Duration) -> CoreResult<Option<Key>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(None);
            }
            if let Some(key) = self.on_event(event::read()?)? {
                return Ok(Some(key));
            }
        }
    }

    fn read_key(&mut self) -> CoreResult<Key> {
        loop {
            if let Some(key) = self.on_event(event::read()?)? {
                return Ok(key);
            }
        }
    }

    fn flush_input(&mut self) -> CoreResult<()> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        Ok(())
    }
}
