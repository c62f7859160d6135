//! Server configuration module

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("SERVER_HOST").unwrap_or(defaults.host);
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("SERVER_PORT", format!("invalid port {raw:?}")))?,
            None => defaults.port,
        };
        let workers = match lookup("SERVER_WORKERS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("SERVER_WORKERS", format!("invalid count {raw:?}")))?,
            None => defaults.workers,
        };

        Ok(Self { host, port, workers })
    }

    /// Get the socket address string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "SERVER_PORT").then(|| "9090".to_string())
        })
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(|key| {
            (key == "SERVER_PORT").then(|| "70000".to_string())
        });
        assert!(result.is_err());
    }
}
