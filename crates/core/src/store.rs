//! Storage seams consumed by the identity and content services.
//!
//! Each trait has a Postgres implementation and an in-memory implementation
//! in `banner-db`. Implementations translate backend failures into
//! [`CoreError`]: absent rows are `NotFound`, unreachable backends are
//! `Unavailable`.

use std::time::Duration;

use async_trait::async_trait;

use crate::banner::{BannerFilter, BannerHistory, BannerView, NewBanner};
use crate::error::CoreError;
use crate::identity::Identity;
use crate::roles::Role;
use crate::types::DbId;

pub type StoreResult<T> = Result<T, CoreError>;

/// Key/value store with per-key expiry, used for sessions.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> StoreResult<()>;

    /// Returns `None` for absent or expired keys.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Idempotent: deleting an absent key succeeds.
    async fn del(&self, key: &str) -> StoreResult<()>;

    /// Drop expired entries, returning how many were removed.
    async fn purge_expired(&self) -> StoreResult<u64>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Durable identity records.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Insert a new identity with an explicit role. A duplicate login is
    /// `Conflict`.
    async fn insert_identity(
        &self,
        login: &str,
        credential_hash: &str,
        role: Role,
    ) -> StoreResult<Identity>;

    /// Insert a new identity with role `user`.
    async fn create_identity(&self, login: &str, credential_hash: &str) -> StoreResult<Identity> {
        self.insert_identity(login, credential_hash, Role::User).await
    }

    async fn login_exists(&self, login: &str) -> StoreResult<bool>;

    async fn find_by_login(&self, login: &str) -> StoreResult<Option<Identity>>;

    async fn resolve_id(&self, login: &str) -> StoreResult<DbId>;

    async fn resolve_role(&self, id: DbId) -> StoreResult<Role>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Durable banners, their tag associations and revisions.
///
/// Every write is a single all-or-nothing unit.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Create the banner, its tag associations and one active revision.
    async fn add_banner(&self, input: &NewBanner) -> StoreResult<DbId>;

    /// Deactivate the current revision, insert a new active one, move the
    /// banner to `input.feature_id` and replace its tag set.
    async fn update_banner(&self, id: DbId, input: &NewBanner) -> StoreResult<()>;

    /// Remove the banner, its revisions and its tag associations.
    async fn delete_banner(&self, id: DbId) -> StoreResult<()>;

    async fn find_banner(&self, id: DbId) -> StoreResult<Option<BannerHistory>>;

    /// The banner serving `(feature_id, tag_id)`, with its revisions.
    async fn find_by_feature_tag(
        &self,
        feature_id: DbId,
        tag_id: DbId,
    ) -> StoreResult<Option<BannerHistory>>;

    /// Banners with their active revision, ordered by banner id.
    async fn list_banners(&self, filter: &BannerFilter) -> StoreResult<Vec<BannerView>>;

    async fn ping(&self) -> StoreResult<()>;
}
