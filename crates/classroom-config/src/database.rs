//! Database connection parameters.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: Full connection string; overrides the individual parts
//! - `DB_HOST`: Database host (default: `localhost`)
//! - `DB_PORT`: Database port (default: `5432`)
//! - `DB_USER`: Username (default: `postgres`)
//! - `DB_PASSWORD`: Password (default: empty)
//! - `DB_NAME`: Database name (default: `classroom`)
//! - `DB_MAX_CONNECTIONS`: Pool size (default: `5`)

use std::env;

use crate::parse_or;

#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database: "classroom".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "DB_PORT", defaults.port),
            username: lookup("DB_USER").unwrap_or(defaults.username),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
        }
    }
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
