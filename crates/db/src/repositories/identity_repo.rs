//! Repository for the `profile` table.

use async_trait::async_trait;
use banner_core::error::CoreError;
use banner_core::identity::Identity;
use banner_core::roles::Role;
use banner_core::store::{IdentityRepository, StoreResult};
use banner_core::types::DbId;

use crate::error::classify;
use crate::models::profile::ProfileRow;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, login, password_hash, role, created_at";

#[derive(Clone)]
pub struct PgIdentityRepo {
    pool: DbPool,
}

impl PgIdentityRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for PgIdentityRepo {
    async fn insert_identity(
        &self,
        login: &str,
        credential_hash: &str,
        role: Role,
    ) -> StoreResult<Identity> {
        let query = format!(
            "INSERT INTO profile (login, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(login)
            .bind(credential_hash)
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match classify(e) {
                CoreError::Conflict(_) => CoreError::Conflict(format!("login '{login}' is taken")),
                other => other,
            })?;
        row.try_into()
    }

    async fn login_exists(&self, login: &str) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM profile WHERE login = $1)")
            .bind(login)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_by_login(&self, login: &str) -> StoreResult<Option<Identity>> {
        let query = format!("SELECT {COLUMNS} FROM profile WHERE login = $1");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(Identity::try_from)
            .transpose()
    }

    async fn resolve_id(&self, login: &str) -> StoreResult<DbId> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM profile WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| CoreError::not_found("identity", login))
    }

    async fn resolve_role(&self, id: DbId) -> StoreResult<Role> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM profile WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| CoreError::not_found("identity", id))?;
        role.parse()
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }
}
