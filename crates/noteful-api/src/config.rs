//! Process configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `API_TOKEN` | required |
//! | `DATABASE_URL` | `postgres://localhost/noteful` (`memory://` for the in-memory store) |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `DB_ACQUIRE_TIMEOUT_SECS` | `30` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//!
//! Logging variables (`LOG_FORMAT`, `LOG_FILE`, `LOG_ANSI`, `RUST_LOG`) are
//! read by the binary before this runs.

use std::time::Duration;

use noteful_core::{Error, Result};
use noteful_db::pool::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};
use noteful_db::PoolConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/noteful";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// `DATABASE_URL` value selecting the in-memory store.
pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_token: String,
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_token = get("API_TOKEN")
            .ok_or_else(|| Error::Config("API_TOKEN must be set".to_string()))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "DB_MAX_CONNECTIONS must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let acquire_timeout = match get("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "DB_ACQUIRE_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    raw
                ))
            })?),
            None => Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_token,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections,
            acquire_timeout,
            allowed_origins,
        })
    }

    /// Whether `DATABASE_URL` selects the in-memory store.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    /// Pool settings for the PostgreSQL store.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("API_TOKEN", "secret")]).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.pool_config(), PoolConfig::default());
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert!(!config.uses_memory_store());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_missing_api_token() {
        let err = config_from(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: API_TOKEN must be set");

        let err = config_from(&[("API_TOKEN", "  ")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("API_TOKEN", "t"), ("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT must be a port number"));

        let err = config_from(&[("API_TOKEN", "t"), ("PORT", "70000")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_TOKEN", "t"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("DATABASE_URL", "postgres://db/noteful"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
            (
                "ALLOWED_ORIGINS",
                "https://noteful.example, ,http://localhost:5173",
            ),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.database_url, "postgres://db/noteful");
        assert_eq!(
            config.pool_config(),
            PoolConfig::new()
                .max_connections(4)
                .acquire_timeout(Duration::from_secs(5))
        );
        assert_eq!(
            config.allowed_origins,
            vec!["https://noteful.example", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_invalid_acquire_timeout() {
        let err = config_from(&[("API_TOKEN", "t"), ("DB_ACQUIRE_TIMEOUT_SECS", "soon")])
            .unwrap_err();
        assert!(err.to_string().contains("DB_ACQUIRE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_memory_store_selection() {
        let config = config_from(&[("API_TOKEN", "t"), ("DATABASE_URL", "memory://")]).unwrap();
        assert!(config.uses_memory_store());
    }
}
