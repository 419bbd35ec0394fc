//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, migrate::MigrateError, pool::PoolConnection};
use tokio::time::sleep;
use tracing::{info, warn};

/// Shared handle to the storage backend.
///
/// Built once at startup and cloned into every service.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check out a pooled connection.
    ///
    /// Statements executed on it autocommit; services do not wrap their
    /// lookups and writes in a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Startup connection retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRetry {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Connect to `PostgreSQL`, retrying with a fixed delay between attempts.
///
/// # Errors
///
/// Returns the last connection error once every attempt has failed.
pub async fn connect_with_retry(
    database_url: &str,
    retry: ConnectRetry,
) -> Result<PgPool, sqlx::Error> {
    retry_connect(retry, || connect(database_url)).await
}

/// Run `attempt_connect` until it succeeds or `retry.attempts` is exhausted.
///
/// At least one attempt is always made.
async fn retry_connect<T, F, Fut>(
    retry: ConnectRetry,
    mut attempt_connect: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let attempts = retry.attempts.max(1);
    let mut attempt = 1;

    loop {
        match attempt_connect().await {
            Ok(connected) => {
                info!(attempt, "connected to database");

                return Ok(connected);
            }
            Err(error) if attempt < attempts => {
                warn!(attempt, attempts, "failed to connect to database: {error}");

                sleep(retry.delay).await;

                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
