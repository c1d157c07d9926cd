//! Log output for the terminal frontend.
//!
//! The screen belongs to the renderer, so logs only go to a file, and only
//! when one is asked for.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Send log records to `path`, filtered by `RUST_LOG` (default `info`).
pub fn init(path: &Path) -> Result<(), String> {
    let file =
        File::create(path).map_err(|e| format!("cannot create log {}: {e}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("cannot install logger: {e}"))
}
