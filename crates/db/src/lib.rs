//! Persistence layer: connection pool, migrations, row models, and the
//! Postgres and in-memory implementations of the `banner-core` store traits.

use std::time::Duration;

use banner_core::error::CoreError;
use banner_core::retry::{connect_with_retry, RetryPolicy};
use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Upper bound on pooled connections per process.
const MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
///
/// The connect-and-ping sequence is retried under `policy`; exhaustion is
/// [`CoreError::Unavailable`].
pub async fn create_pool(database_url: &str, policy: &RetryPolicy) -> Result<DbPool, CoreError> {
    connect_with_retry("postgres", policy, || async {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        health_check(&pool).await?;
        Ok::<_, sqlx::Error>(pool)
    })
    .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
