//! Logging configuration.
//!
//! - `LOG_LEVEL`: Default level for this application's targets (default: `info`)
//! - `LOG_DIR`: Directory for the rotating JSON log file (default: `storage/logs`)
//!
//! `RUST_LOG`, when set, takes precedence over `LOG_LEVEL` at subscriber setup.

use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "storage/logs".to_string(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            level: lookup("LOG_LEVEL")
                .map(|level| level.trim().to_lowercase())
                .filter(|level| !level.is_empty())
                .unwrap_or(defaults.level),
            dir: lookup("LOG_DIR").unwrap_or(defaults.dir),
        }
    }
}
