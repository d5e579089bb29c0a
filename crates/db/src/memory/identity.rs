use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use banner_core::error::CoreError;
use banner_core::identity::Identity;
use banner_core::roles::Role;
use banner_core::store::{IdentityRepository, StoreResult};
use banner_core::types::DbId;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: DbId,
    by_login: HashMap<String, Identity>,
}

/// Identities keyed by login.
#[derive(Clone, Default)]
pub struct MemoryIdentityRepo {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryIdentityRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for MemoryIdentityRepo {
    async fn insert_identity(
        &self,
        login: &str,
        credential_hash: &str,
        role: Role,
    ) -> StoreResult<Identity> {
        let mut inner = self.inner.write().await;
        if inner.by_login.contains_key(login) {
            return Err(CoreError::Conflict(format!("login '{login}' is taken")));
        }
        inner.next_id += 1;
        let identity = Identity {
            id: inner.next_id,
            login: login.to_string(),
            credential_hash: credential_hash.to_string(),
            role,
        };
        inner.by_login.insert(login.to_string(), identity.clone());
        Ok(identity)
    }

    async fn login_exists(&self, login: &str) -> StoreResult<bool> {
        Ok(self.inner.read().await.by_login.contains_key(login))
    }

    async fn find_by_login(&self, login: &str) -> StoreResult<Option<Identity>> {
        Ok(self.inner.read().await.by_login.get(login).cloned())
    }

    async fn resolve_id(&self, login: &str) -> StoreResult<DbId> {
        self.inner
            .read()
            .await
            .by_login
            .get(login)
            .map(|identity| identity.id)
            .ok_or_else(|| CoreError::not_found("identity", login))
    }

    async fn resolve_role(&self, id: DbId) -> StoreResult<Role> {
        self.inner
            .read()
            .await
            .by_login
            .values()
            .find(|identity| identity.id == id)
            .map(|identity| identity.role)
            .ok_or_else(|| CoreError::not_found("identity", id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
