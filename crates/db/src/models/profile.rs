//! Identity row from the `profile` table.

use banner_core::error::CoreError;
use banner_core::identity::Identity;
use banner_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full `profile` row. Contains the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: DbId,
    pub login: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl TryFrom<ProfileRow> for Identity {
    type Error = CoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: row.id,
            login: row.login,
            credential_hash: row.password_hash,
            role: row.role.parse()?,
        })
    }
}
