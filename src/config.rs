use std::net::SocketAddr;

use crate::error::{QueryError, Result};

pub const DEFAULT_DB_PATH: &str = "board_games.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// SQLite catalog file
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `DB_PATH`, `HOST` and `PORT` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| QueryError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => defaults.port,
        };

        let db_path = lookup("DB_PATH").unwrap_or(defaults.db_path);
        if db_path.trim().is_empty() {
            return Err(QueryError::Config("DB_PATH cannot be empty".to_string()));
        }

        Ok(Self {
            db_path,
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Socket address to bind; `HOST` must be an IP address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| QueryError::Config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e)))
    }
}
