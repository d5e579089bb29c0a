//! Session store: token to login with expiry, backed by a [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use banner_core::error::CoreError;
use banner_core::session::{generate_session_token, Session};
use banner_core::store::CacheStore;
use chrono::Utc;
use tokio::sync::RwLock;

/// Creates, looks up and deletes sessions.
///
/// A single per-process lock serializes create-then-verify against lookups
/// and deletes, so a session reported as created is visible to the next
/// lookup. The backing store remains the system of record.
pub struct SessionStore {
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
    lock: RwLock<()>,
}

impl SessionStore {
    pub fn new(cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            cache,
            ttl,
            lock: RwLock::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a new session for `login` and confirm the write by reading it back.
    pub async fn create(&self, login: &str) -> Result<Session, CoreError> {
        let _guard = self.lock.write().await;

        let token = generate_session_token();
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| CoreError::Internal(format!("Session TTL out of range: {e}")))?;
        let expires_at = Utc::now() + ttl;

        self.cache.set(&token, login, self.ttl).await?;

        match self.cache.get(&token).await? {
            Some(stored) if stored == login => {}
            _ => {
                tracing::error!(login, "Session read-back did not match the write");
                return Err(CoreError::Unavailable("session write not confirmed".into()));
            }
        }

        Ok(Session {
            token,
            login: login.to_string(),
            expires_at,
        })
    }

    /// The login owning `token`. Absent or expired tokens are `NotFound`.
    pub async fn lookup(&self, token: &str) -> Result<String, CoreError> {
        let _guard = self.lock.read().await;
        self.cache
            .get(token)
            .await?
            .ok_or_else(|| CoreError::not_found("session", "token"))
    }

    /// Idempotent.
    pub async fn delete(&self, token: &str) -> Result<(), CoreError> {
        let _guard = self.lock.write().await;
        self.cache.del(token).await
    }

    /// Remove expired entries from the backing store.
    pub async fn purge_expired(&self) -> Result<u64, CoreError> {
        self.cache.purge_expired().await
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        self.cache.ping().await
    }
}
