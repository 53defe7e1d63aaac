use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} must be a positive integer, got {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Page size used when a list request gives no usable `limit`.
    pub paginator_limit_default: u32,
    pub query_timeout: Duration,
}

impl Config {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let paginator_limit_default = lookup("PAGINATOR_LIMIT_DEFAULT")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("PAGINATOR_LIMIT_DEFAULT"))
            .and_then(|v| positive("PAGINATOR_LIMIT_DEFAULT", v))?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => positive("DATABASE_MAX_CONNECTIONS", v)?,
            None => 5,
        };

        let port = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name: "PORT", value: v })?,
            None => 8080,
        };

        let query_timeout_secs = match lookup("DB_QUERY_TIMEOUT_SECS") {
            Some(v) => positive("DB_QUERY_TIMEOUT_SECS", v)?,
            None => 5,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://courses.db".to_string()),
            database_max_connections,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            paginator_limit_default,
            query_timeout: Duration::from_secs(u64::from(query_timeout_secs)),
        })
    }
}

fn positive(name: &'static str, value: String) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}
