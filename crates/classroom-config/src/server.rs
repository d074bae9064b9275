//! HTTP listener configuration.
//!
//! - `SERVER_HOST`: Bind host (default: `0.0.0.0`)
//! - `SERVER_PORT`: Bind port (default: `8080`)

use std::env;

use crate::parse_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
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
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "SERVER_PORT", defaults.port),
        }
    }

    /// Address suitable for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_custom_port() {
        let config = ServerConfig::from_lookup(|key| match key {
            "SERVER_HOST" => Some("127.0.0.1".to_string()),
            "SERVER_PORT" => Some("3000".to_string()),
            _ => None,
        });
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_out_of_range_port_falls_back() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "SERVER_PORT").then(|| "70000".to_string())
        });
        assert_eq!(config.port, 8080);
    }
}
