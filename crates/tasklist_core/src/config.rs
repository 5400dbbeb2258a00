//! Runtime configuration for list storage.
//!
//! Resolved from environment variables with fixed fallbacks; blank values
//! count as unset.

use crate::store::item_store::DEFAULT_SLOT_KEY;
use std::path::PathBuf;

/// Env var overriding the SQLite database path.
pub const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
/// Env var overriding the slot key holding the collection.
pub const SLOT_KEY_ENV: &str = "TASKLIST_SLOT_KEY";
/// Database file name used under the temp dir when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Where and under which key the list is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasklistConfig {
    pub db_path: PathBuf,
    pub slot_key: String,
}

impl Default for TasklistConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl TasklistConfig {
    /// Reads `TASKLIST_DB_PATH` and `TASKLIST_SLOT_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let db_path = non_blank(lookup(DB_PATH_ENV))
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let slot_key = non_blank(lookup(SLOT_KEY_ENV)).unwrap_or(defaults.slot_key);
        Self { db_path, slot_key }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{TasklistConfig, DB_PATH_ENV, SLOT_KEY_ENV};
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_defaults() {
        let config = TasklistConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some(" /data/list.db ".to_string()),
            SLOT_KEY_ENV => Some("groceries".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/data/list.db"));
        assert_eq!(config.slot_key, "groceries");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = TasklistConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, TasklistConfig::default());
        assert_eq!(config.slot_key, "todos");
    }
}
