//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the transaction cannot start.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
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

/// Connect to `PostgreSQL`, retrying on a fixed delay until the server accepts connections.
///
/// Only connection-level failures are retried; configuration errors (such as a malformed
/// URL) are returned immediately.
///
/// # Errors
///
/// Returns an error when the connection options are invalid.
pub async fn connect_with_retry(
    database_url: &str,
    delay: Duration,
) -> Result<PgPool, sqlx::Error> {
    let mut attempt: u32 = 1;

    loop {
        match connect(database_url).await {
            Ok(pool) => {
                info!(attempt, "connected to database");

                return Ok(pool);
            }
            Err(error) if is_retryable(&error) => {
                warn!(
                    attempt,
                    retry_in_secs = delay.as_secs(),
                    "database connection failed: {error}"
                );

                tokio::time::sleep(delay).await;

                attempt = attempt.saturating_add(1);
            }
            Err(error) => return Err(error),
        }
    }
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// `cannot_connect_now`: the server is still starting up or shutting down.
const CANNOT_CONNECT_NOW: &str = "57P03";

fn is_retryable(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(error) => error.code().as_deref() == Some(CANNOT_CONNECT_NOW),
        _ => false,
    }
}
