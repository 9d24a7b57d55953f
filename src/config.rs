//! Connection pool configuration for the `PostgreSQL` adapters.
//!
//! Values come from the process environment:
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required |
//! | `WORKSPACE_VIEWS_POOL_SIZE` | `10` |
//! | `WORKSPACE_VIEWS_POOL_TIMEOUT_SECS` | `30` |

use crate::workspace_view::adapters::postgres::ViewPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "WORKSPACE_VIEWS_POOL_SIZE";
/// Environment variable holding the connection checkout timeout in seconds.
pub const POOL_TIMEOUT_VAR: &str = "WORKSPACE_VIEWS_POOL_TIMEOUT_SECS";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {name}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value found in the environment.
        value: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Settings for the r2d2 connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Creates a configuration with default pool sizing.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_POOL_SIZE,
            connection_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset, or
    /// [`ConfigError::Invalid`] when a sizing variable is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`PoolConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(POOL_SIZE_VAR) {
            config.max_size = parse_positive(POOL_SIZE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(POOL_TIMEOUT_VAR) {
            config.connection_timeout = Duration::from_secs(parse_positive(POOL_TIMEOUT_VAR, &raw)?);
        }
        Ok(config)
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the connection checkout timeout.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Returns the database connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Returns the connection checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Builds the connection pool shared by the `PostgreSQL` adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<ViewPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?;
        tracing::info!(max_size = self.max_size, "built workspace view connection pool");
        Ok(pool)
    }
}

fn parse_positive<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let invalid = || ConfigError::Invalid {
        name,
        value: raw.to_owned(),
    };
    let parsed: T = raw.trim().parse().map_err(|_| invalid())?;
    if parsed <= T::default() {
        return Err(invalid());
    }
    Ok(parsed)
}
