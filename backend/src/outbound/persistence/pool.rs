//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8`. The pool is an owned value that callers
//! construct once and inject into adapters; there is no process-wide handle.
//!
//! - Checkout respects the configured connection timeout.
//! - Idle and lifetime limits are enforced by the `bb8` reaper, whose counters
//!   surface through [`DbPool::statistics`].
//! - All errors are mapped to [`PoolError`] variants.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::domain::PoolStatistics;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use user_registry::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("host=localhost user=app dbname=users")
///     .with_max_size(20)
///     .with_min_idle(Some(5))
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
    idle_timeout: Option<Duration>,
    max_lifetime: Option<Duration>,
}

impl PoolConfig {
    /// Create a new configuration for the given connection string.
    ///
    /// Accepts either a `postgres://` URL or a libpq key/value DSN. Defaults:
    /// - `max_size`: 10 connections
    /// - `min_idle`: 2 connections
    /// - `connection_timeout`: 30 seconds
    /// - `idle_timeout`: 10 minutes
    /// - `max_lifetime`: 30 minutes
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(10 * 60)),
            max_lifetime: Some(Duration::from_secs(30 * 60)),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Close connections idle for longer than `timeout`; `None` keeps them.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Recycle connections older than `lifetime`; `None` keeps them forever.
    pub fn with_max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Get the connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    fn builder(&self) -> bb8::Builder<AsyncDieselConnectionManager<AsyncPgConnection>> {
        Pool::builder()
            .max_size(self.max_size)
            .min_idle(self.min_idle)
            .connection_timeout(self.connection_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }

    fn manager(&self) -> AsyncDieselConnectionManager<AsyncPgConnection> {
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(&self.database_url)
    }
}

/// Async connection pool for PostgreSQL via Diesel.
///
/// Cloning is cheap; clones share the underlying pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Create a pool and establish the minimum idle connections up front.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed, for
    /// example when the store is unreachable.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let pool = config
            .builder()
            .build(config.manager())
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Create a pool without contacting the store.
    ///
    /// Connections are opened in the background and on first checkout, so an
    /// unreachable store surfaces later as checkout failures and a `down`
    /// health report. Must be called inside a Tokio runtime.
    pub fn connect_lazy(config: PoolConfig) -> Self {
        let pool = config.builder().build_unchecked(config.manager());
        Self { inner: pool }
    }

    /// Get a connection from the pool.
    ///
    /// The connection returns to the pool when the guard drops, on every
    /// path including errors.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Snapshot the pool's occupancy and lifetime counters.
    pub fn statistics(&self) -> PoolStatistics {
        let state = self.inner.state();
        let counters = &state.statistics;
        PoolStatistics {
            open_connections: state.connections,
            in_use: state.connections.saturating_sub(state.idle_connections),
            idle: state.idle_connections,
            wait_count: counters.get_waited,
            wait_duration: counters.get_wait_time,
            max_idle_closed: counters.connections_closed_idle_timeout,
            max_lifetime_closed: counters.connections_closed_max_lifetime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("postgres://localhost/test");

        assert_eq!(config.database_url(), "postgres://localhost/test");
        assert_eq!(config.max_size(), 10);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.max_lifetime, Some(Duration::from_secs(1800)));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("postgres://localhost/test")
            .with_max_size(20)
            .with_min_idle(None)
            .with_connection_timeout(Duration::from_secs(60))
            .with_idle_timeout(None)
            .with_max_lifetime(Some(Duration::from_secs(5)));

        assert_eq!(config.max_size(), 20);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout, Duration::from_secs(60));
        assert_eq!(config.idle_timeout, None);
        assert_eq!(config.max_lifetime, Some(Duration::from_secs(5)));
    }

    #[rstest]
    fn pool_error_display() {
        let checkout_err = PoolError::checkout("connection refused");
        let build_err = PoolError::build("invalid URL");

        assert!(checkout_err.to_string().contains("connection refused"));
        assert!(build_err.to_string().contains("invalid URL"));
    }

    #[tokio::test]
    async fn lazy_pool_starts_with_zero_checkouts() {
        let config = PoolConfig::new("host=127.0.0.1 port=1 user=nobody dbname=none")
            .with_min_idle(None);
        let pool = DbPool::connect_lazy(config);

        let stats = pool.statistics();
        assert_eq!(stats.in_use, 0);
        assert_eq!(stats.wait_count, 0);
        assert_eq!(stats.max_idle_closed, 0);
    }
}
