//! Error types for the scene engine.

use thiserror::Error;

/// Result type for scene engine operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while running scenes.
///
/// Text reveal itself never fails; every variant here comes from the
/// renderer or the persisted state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The renderer or a state file failed at the I/O level.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be parsed or serialized.
    #[error("invalid game state: {0}")]
    InvalidState(#[from] serde_json::Error),

    /// A scene needed a state entry that is absent or not a string.
    #[error("missing state key: {0}")]
    MissingStateKey(String),
}
