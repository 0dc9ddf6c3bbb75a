//! Storage configuration resolved from the process environment.
//!
//! # Responsibility
//! - Locate the on-device database file and the slot key.
//!
//! # Invariants
//! - Blank environment values are ignored in favor of defaults.

use crate::repo::todo_repo::TODO_LIST_SLOT;
use std::path::PathBuf;

/// Overrides the database file path.
pub const DB_PATH_ENV: &str = "LAZYTODO_DB_PATH";
/// Overrides the slot key.
pub const SLOT_KEY_ENV: &str = "LAZYTODO_SLOT_KEY";

const DEFAULT_DB_FILE_NAME: &str = "lazytodo.sqlite3";

/// Where the record sequence is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub db_path: PathBuf,
    pub slot_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            slot_key: TODO_LIST_SLOT.to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolves `LAZYTODO_DB_PATH` and `LAZYTODO_SLOT_KEY`, falling back to
    /// `<temp_dir>/lazytodo.sqlite3` and `TODO_LIST_V2`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = non_blank(lookup(DB_PATH_ENV)) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = non_blank(lookup(SLOT_KEY_ENV)) {
            config.slot_key = key;
        }
        config
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
