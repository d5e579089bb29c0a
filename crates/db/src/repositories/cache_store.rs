//! Repository for the `session_cache` table.

use std::time::Duration;

use async_trait::async_trait;
use banner_core::store::{CacheStore, StoreResult};

use crate::error::classify;
use crate::DbPool;

/// Expiring key/value entries in Postgres. Expired rows are invisible to
/// reads and removed by `purge_expired`.
#[derive(Clone)]
pub struct PgCacheStore {
    pool: DbPool,
}

impl PgCacheStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for PgCacheStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO session_cache (key, value, expires_at)
             VALUES ($1, $2, NOW() + make_interval(secs => $3))
             ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at",
        )
        .bind(key)
        .bind(value)
        .bind(ttl.as_secs_f64())
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT value FROM session_cache WHERE key = $1 AND expires_at > NOW()",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM session_cache WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn purge_expired(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM session_cache WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }
}
