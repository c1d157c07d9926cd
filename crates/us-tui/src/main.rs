//! Terminal binary for Universal Sandbox.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use us_core::config::secs;
use us_core::{GameState, RevealConfig};
use us_scenes::Script;
use us_tui::terminal::{self, RunOutcome};

#[derive(Parser)]
#[command(
    name = "us-tui",
    about = "Play a Universal Sandbox scene script in the terminal",
    version
)]
struct Args {
    /// Scene script (JSON)
    #[arg(long)]
    script: PathBuf,

    /// Game state file, created on first save
    #[arg(long)]
    state: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Default seconds between revealed lines
    #[arg(long)]
    line_delay: Option<f64>,

    /// Default seconds between pages
    #[arg(long)]
    pager_delay: Option<f64>,

    /// Do not write the state file when the story ends
    #[arg(long)]
    no_save: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    if let Some(log) = &args.log {
        us_tui::logging::init(log)?;
    }

    let script = Script::load(&args.script).map_err(|e| e.to_string())?;
    info!(
        title = script.title.as_deref().unwrap_or("untitled"),
        beats = script.beats.len(),
        "script loaded"
    );

    let mut state = match &args.state {
        Some(path) => GameState::load_or_default(path).map_err(|e| e.to_string())?,
        None => GameState::new(),
    };

    let mut config = RevealConfig::default();
    if let Some(delay) = args.line_delay {
        config = config.with_line_delay(secs(delay));
    }
    if let Some(delay) = args.pager_delay {
        config = config.with_pager_delay(secs(delay));
    }

    let Some(first) = script.into_scene() else {
        return Err("script has no beats".into());
    };

    match terminal::run(first, &mut state, config)? {
        RunOutcome::Finished(scenes) => {
            info!(scenes, "story finished");
            if let Some(path) = &args.state
                && !args.no_save
            {
                state.save(path).map_err(|e| e.to_string())?;
                info!(path = %path.display(), "state saved");
            }
        }
        RunOutcome::Quit => info!("quit before the end, state not saved"),
    }
    Ok(())
}
