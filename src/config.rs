//! Database connection settings.

use crate::board::adapters::postgres::BoardPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Default number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Errors raised while turning settings into a connection pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No database URL was supplied.
    #[error("database URL is required (set DATABASE_URL or pass --database-url)")]
    MissingDatabaseUrl,
    /// The pool size was zero.
    #[error("max connections must be at least 1")]
    ZeroConnections,
    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    max_connections: u32,
}

impl DatabaseConfig {
    /// Creates settings for `url` with the default pool size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when `url` is blank.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(Self {
            url: trimmed.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        })
    }

    /// Sets the pool size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroConnections`] when `max_connections` is 0.
    pub fn with_max_connections(mut self, max_connections: u32) -> Result<Self, ConfigError> {
        if max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        self.max_connections = max_connections;
        Ok(self)
    }

    /// Returns the database URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the pool size.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Builds an r2d2 pool for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<BoardPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        Ok(Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?)
    }
}
