//! Persisted game state.
//!
//! The engine treats the state as an opaque JSON document: scenes read the
//! entries they need by dotted path and the frontend saves it between runs.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Data carried across scenes and sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Arbitrary scene data.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// When the state was last saved.
    #[serde(default)]
    pub last_save: Option<DateTime<Utc>>,
}

impl GameState {
    /// Create an empty state that has never been saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a state file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Read a state file, or start empty if it does not exist yet.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Stamp the save time and write the state to `path`.
    pub fn save(&mut self, path: &Path) -> CoreResult<()> {
        self.last_save = Some(Utc::now());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Look up a value by dotted path, e.g. `user.username`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = self.data.get(segments.next()?)?;
        segments.try_fold(first, |value, segment| value.get(segment))
    }

    /// Look up a string value by dotted path.
    pub fn get_str(&self, path: &str) -> CoreResult<&str> {
        self.get(path)
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::MissingStateKey(path.to_string()))
    }

    /// Set a top-level entry.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// Human-readable last save time, or `never`.
    pub fn last_save_label(&self) -> String {
        match self.last_save {
            Some(time) => time.format("%a %b %e %H:%M:%S %Y").to_string(),
            None => "never".to_string(),
        }
    }
}
