use std::str::FromStr;
use std::time::Duration;

use banner_core::resolver::{DEFAULT_STALENESS_SECS, MAX_STALENESS_SECS};
use banner_core::retry::RetryPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Content service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    pub database_url: String,
    /// Root URL of the identity RPC listener.
    pub identity_rpc_url: String,
    /// Per-call identity RPC deadline.
    pub rpc_timeout: Duration,
    /// Settle time for `use_last_revision=false` reads, in seconds.
    /// Between `0` and `MAX_STALENESS_SECS`.
    pub staleness_secs: i64,
    /// Startup retry for the database and the identity RPC ping.
    pub connect_retry: RetryPolicy,
    pub request_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `8080`                   |
    /// | `DATABASE_URL`             | required                 |
    /// | `IDENTITY_RPC_URL`         | `http://127.0.0.1:8082`  |
    /// | `RPC_TIMEOUT_SECS`         | `5`                      |
    /// | `BANNER_STALENESS_SECS`    | `300`                    |
    /// | `CONNECT_MAX_ATTEMPTS`     | `5`                      |
    /// | `CONNECT_RETRY_DELAY_SECS` | `2`                      |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 8080)?,
            database_url,
            identity_rpc_url: std::env::var("IDENTITY_RPC_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8082".into()),
            rpc_timeout: Duration::from_secs(env_or("RPC_TIMEOUT_SECS", 5)?),
            staleness_secs: staleness_in_range(env_or(
                "BANNER_STALENESS_SECS",
                DEFAULT_STALENESS_SECS,
            )?)?,
            connect_retry: RetryPolicy {
                max_attempts: env_or("CONNECT_MAX_ATTEMPTS", 5)?,
                delay: Duration::from_secs(env_or("CONNECT_RETRY_DELAY_SECS", 2)?),
            },
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

fn staleness_in_range(secs: i64) -> Result<i64, ConfigError> {
    if (0..=MAX_STALENESS_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(ConfigError::Invalid {
            var: "BANNER_STALENESS_SECS",
            value: secs.to_string(),
        })
    }
}
