//! Database connection settings loaded from the environment.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("DATABASE_URL is not a valid PostgreSQL URL: {0}")]
    InvalidUrl(String),

    #[error("POSTGRES_SSLMODE '{0}' is not a recognised sslmode")]
    InvalidSslMode(String),
}

/// Connection target and pool tuning.
///
/// | Env Var                      | Default   |
/// |------------------------------|-----------|
/// | `DATABASE_URL`               | composed from `POSTGRES_*` |
/// | `POSTGRES_PORT`              | `5432`    |
/// | `POSTGRES_SSLMODE`           | `disable` |
/// | `DB_MAX_CONNS`               | `25`      |
/// | `DB_MIN_CONNS`               | `5`       |
/// | `DB_MAX_CONN_LIFETIME_SECS`  | `18000`   |
/// | `DB_MAX_CONN_IDLE_TIME_SECS` | `900`     |
/// | `DB_ACQUIRE_TIMEOUT_SECS`    | `30`      |
#[derive(Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// When `DATABASE_URL` is absent the target is assembled from
    /// `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_HOST` and `POSTGRES_DB`,
    /// all of which are then required. The parts are set on
    /// [`PgConnectOptions`] individually, so credentials need no escaping.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match get(key) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { key, value }),
            }
        };
        let narrow = |key: &'static str, value: u64| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        };

        let connect_options = match get("DATABASE_URL") {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?,
            None => {
                let user = get("POSTGRES_USER").ok_or(ConfigError::Missing("POSTGRES_USER"))?;
                let password =
                    get("POSTGRES_PASSWORD").ok_or(ConfigError::Missing("POSTGRES_PASSWORD"))?;
                let host = get("POSTGRES_HOST").ok_or(ConfigError::Missing("POSTGRES_HOST"))?;
                let db = get("POSTGRES_DB").ok_or(ConfigError::Missing("POSTGRES_DB"))?;
                let port = number("POSTGRES_PORT", 5432)?;
                let port = u16::try_from(port).map_err(|_| narrow("POSTGRES_PORT", port))?;
                let sslmode = get("POSTGRES_SSLMODE").unwrap_or_else(|| "disable".into());
                let ssl_mode = sslmode
                    .parse::<PgSslMode>()
                    .map_err(|_| ConfigError::InvalidSslMode(sslmode))?;

                PgConnectOptions::new_without_pgpass()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .password(&password)
                    .database(&db)
                    .ssl_mode(ssl_mode)
            }
        };

        let max_connections = number("DB_MAX_CONNS", 25)?;
        let min_connections = number("DB_MIN_CONNS", 5)?;

        Ok(Self {
            connect_options,
            max_connections: u32::try_from(max_connections)
                .map_err(|_| narrow("DB_MAX_CONNS", max_connections))?,
            min_connections: u32::try_from(min_connections)
                .map_err(|_| narrow("DB_MIN_CONNS", min_connections))?,
            max_lifetime: Duration::from_secs(number("DB_MAX_CONN_LIFETIME_SECS", 5 * 60 * 60)?),
            idle_timeout: Duration::from_secs(number("DB_MAX_CONN_IDLE_TIME_SECS", 15 * 60)?),
            acquire_timeout: Duration::from_secs(number("DB_ACQUIRE_TIMEOUT_SECS", 30)?),
        })
    }

    /// `user@host:port/database`, for logging. Never includes the password.
    pub fn redacted_target(&self) -> String {
        let options = &self.connect_options;
        format!(
            "{}@{}:{}/{}",
            options.get_username(),
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("target", &self.redacted_target())
            .field("ssl_mode", &self.connect_options.get_ssl_mode())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("max_lifetime", &self.max_lifetime)
            .field("idle_timeout", &self.idle_timeout)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}
