use std::str::FromStr;
use std::time::Duration;

use banner_core::retry::RetryPolicy;
use banner_core::session::DEFAULT_SESSION_TTL_SECS;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Backend holding session entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// Process-local map. Sessions are lost on restart.
    Memory,
    /// The `session_cache` table.
    Postgres,
}

impl FromStr for SessionBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(SessionBackend::Memory),
            "postgres" => Ok(SessionBackend::Postgres),
            _ => Err(()),
        }
    }
}

/// Identity service configuration loaded from environment variables.
///
/// All fields except `database_url` have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for both listeners (default: `0.0.0.0`).
    pub host: String,
    /// Public signup/signin/logout port (default: `8081`).
    pub port: u16,
    /// Internal RPC port (default: `8082`).
    pub rpc_port: u16,
    pub database_url: String,
    pub session_backend: SessionBackend,
    pub session_ttl: Duration,
    /// Interval of the expired-session sweep (default: `60`s, never zero).
    pub session_purge_interval: Duration,
    /// Startup connection retry for the database and the session store.
    pub connect_retry: RetryPolicy,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
    /// Optional admin account created at startup when absent.
    pub admin_login: Option<String>,
    pub admin_password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `8081`                  |
    /// | `RPC_PORT`                 | `8082`                  |
    /// | `DATABASE_URL`             | required                |
    /// | `SESSION_STORE`            | `postgres`              |
    /// | `SESSION_TTL_SECS`         | `86400`                 |
    /// | `SESSION_PURGE_SECS`       | `60`                    |
    /// | `CONNECT_MAX_ATTEMPTS`     | `5`                     |
    /// | `CONNECT_RETRY_DELAY_SECS` | `2`                     |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `COOKIE_SECURE`            | `false`                 |
    /// | `ADMIN_LOGIN`              | unset                   |
    /// | `ADMIN_PASSWORD`           | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 8081)?,
            rpc_port: env_or("RPC_PORT", 8082)?,
            database_url,
            session_backend: env_or("SESSION_STORE", SessionBackend::Postgres)?,
            session_ttl: Duration::from_secs(env_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?),
            session_purge_interval: nonzero_secs(
                "SESSION_PURGE_SECS",
                env_or("SESSION_PURGE_SECS", 60)?,
            )?,
            connect_retry: RetryPolicy {
                max_attempts: env_or("CONNECT_MAX_ATTEMPTS", 5)?,
                delay: Duration::from_secs(env_or("CONNECT_RETRY_DELAY_SECS", 2)?),
            },
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            cors_origins: parse_list(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
            ),
            cookie_secure: env_or("COOKIE_SECURE", false)?,
            admin_login: std::env::var("ADMIN_LOGIN").ok().filter(|s| !s.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        })
    }
}

/// Read `var`, falling back to `default` when unset.
fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

fn nonzero_secs(var: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
