//! Identity records owned by the identity repository.

use crate::roles::Role;
use crate::types::DbId;

/// A stored identity. `credential_hash` is a PHC-formatted Argon2id string
/// and must never leave the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: DbId,
    pub login: String,
    pub credential_hash: String,
    pub role: Role,
}
