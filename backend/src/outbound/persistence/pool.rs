//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8`. Checkout is non-blocking and bounded by
//! the configured timeout, which is the only timeout the service applies to
//! store calls.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Default upper bound on open connections.
pub const DEFAULT_MAX_SIZE: u32 = 10;

/// Default checkout timeout.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building the pool or checking out a connection.
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

/// Pool sizing and checkout settings.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use users_api::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/users")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration with [`DEFAULT_MAX_SIZE`], no idle floor, and
    /// [`DEFAULT_CONNECTION_TIMEOUT`].
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: None,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
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

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    fn validate(&self) -> Result<(), PoolError> {
        if self.max_size == 0 {
            return Err(PoolError::build("max_size must be greater than zero"));
        }
        if self.min_idle.is_some_and(|min_idle| min_idle > self.max_size) {
            return Err(PoolError::build("min_idle must not exceed max_size"));
        }
        Ok(())
    }
}

/// Async connection pool for PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the sizing is inconsistent or the
    /// pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection is available within
    /// the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_lazy_and_bounded() {
        let config = PoolConfig::new("postgres://localhost/users");

        assert_eq!(config.database_url(), "postgres://localhost/users");
        assert_eq!(config.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout(), DEFAULT_CONNECTION_TIMEOUT);
    }

    #[rstest]
    #[case(0, None, "max_size must be greater than zero")]
    #[case(2, Some(3), "min_idle must not exceed max_size")]
    fn rejects_inconsistent_sizing(
        #[case] max_size: u32,
        #[case] min_idle: Option<u32>,
        #[case] expected: &str,
    ) {
        let config = PoolConfig::new("postgres://localhost/users")
            .with_max_size(max_size)
            .with_min_idle(min_idle);
        let error = config.validate().expect_err("invalid sizing");
        assert_eq!(error, PoolError::build(expected));
    }

    #[rstest]
    fn accepts_consistent_sizing() {
        let config = PoolConfig::new("postgres://localhost/users")
            .with_max_size(4)
            .with_min_idle(Some(4));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn pool_error_display_includes_message() {
        assert!(
            PoolError::checkout("connection refused")
                .to_string()
                .contains("connection refused")
        );
        assert!(PoolError::build("bad url").to_string().contains("bad url"));
    }
}
