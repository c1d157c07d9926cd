//! Terminal setup, teardown, and the story run.

use std::io;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing::info;
use us_core::{CoreError, Director, GameState, RevealConfig, Scene};

use crate::backend::TerminalRenderer;

/// How a story run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The last scene finished; holds the number of scenes played.
    Finished(usize),
    /// The player quit with Ctrl+C.
    Quit,
}

/// Take over the terminal, play the story from `first`, and restore the terminal.
pub fn run(
    first: Box<dyn Scene>,
    state: &mut GameState,
    config: RevealConfig,
) -> Result<RunOutcome, String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;
    let mut renderer = TerminalRenderer::new(terminal).map_err(|e| format!("terminal error: {e}"))?;
    renderer.hide_cursor().ok();

    let played = Director::new(config).run(&mut renderer, state, first);

    disable_raw_mode().ok();
    let mut terminal = renderer.into_terminal();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    outcome(played)
}

/// Ctrl+C surfaces as an interrupted I/O error; everything else is a failure.
fn outcome(played: Result<usize, CoreError>) -> Result<RunOutcome, String> {
    match played {
        Ok(scenes) => Ok(RunOutcome::Finished(scenes)),
        Err(CoreError::Io(e)) if e.kind() == io::ErrorKind::Interrupted => {
            info!("quit by user");
            Ok(RunOutcome::Quit)
        }
        Err(e) => Err(e.to_string()),
    }
}
