//! Runtime configuration for the storage session and logging.
//!
//! # Responsibility
//! - Resolve connection parameters and log settings from the environment.
//! - Fall back to stable defaults when a key is absent or blank.
//!
//! # Invariants
//! - Resolution never fails; invalid log levels are rejected later by
//!   `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_ENV: &str = "STAFFBOOK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STAFFBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STAFFBOOK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "staffbook.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "staffbook-logs";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection parameters for `StorageHandle::connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file; created on first connect.
    pub db_path: PathBuf,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Resolves from `STAFFBOOK_DB_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Resolves using `lookup` in place of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = non_blank(lookup(DB_PATH_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        Self::new(db_path)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE_NAME)
    }
}

/// File logging settings consumed by `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Resolves from `STAFFBOOK_LOG_LEVEL` and `STAFFBOOK_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let level = non_blank(lookup(LOG_LEVEL_ENV))
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_blank(lookup(LOG_DIR_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        Self { level, log_dir }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{LogConfig, StoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn store_config_defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.db_path, PathBuf::from("staffbook.sqlite3"));
    }

    #[test]
    fn store_config_uses_trimmed_override() {
        let config = StoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "  /data/hr.db \n")]));
        assert_eq!(config.db_path, PathBuf::from("/data/hr.db"));
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        let config = StoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")]));
        assert_eq!(config.db_path, PathBuf::from("staffbook.sqlite3"));
    }

    #[test]
    fn log_config_reads_level_and_dir() {
        let config = LogConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/staffbook"),
        ]));
        assert_eq!(config.level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/staffbook"));
    }

    #[test]
    fn log_config_default_dir_is_absolute() {
        let config = LogConfig::from_lookup(lookup_from(&[]));
        assert!(config.log_dir.is_absolute());
        assert!(!config.level.is_empty());
    }
}
