//! Error types for scene scripts.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors that can occur while loading a scene script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("cannot read script {path}: {source}")]
    Io {
        /// Path of the script file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The script is not valid JSON or does not match the beat format.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// The script has no beats to play.
    #[error("script has no beats")]
    Empty,
}
