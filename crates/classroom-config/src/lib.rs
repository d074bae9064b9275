//! # Classroom Config
//!
//! Configuration types for the Classroom API, loaded from environment
//! variables (optionally seeded from a `.env` file by the binary).
//!
//! - [`database`]: PostgreSQL connection parameters
//! - [`server`]: HTTP listener address
//! - [`logging`]: Log level and log file directory
//!
//! # Example
//!
//! ```ignore
//! use classroom_config::{DatabaseConfig, LogConfig, ServerConfig};
//!
//! let database = DatabaseConfig::from_env();
//! let server = ServerConfig::from_env();
//! let logging = LogConfig::from_env();
//! ```

pub mod database;
pub mod logging;
pub mod server;

// Re-export commonly used types at crate root
pub use database::DatabaseConfig;
pub use logging::LogConfig;
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is unset or malformed.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
