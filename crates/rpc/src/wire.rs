//! Request and response bodies for the identity RPC endpoints.

use serde::{Deserialize, Serialize};

use banner_core::types::DbId;

pub const RESOLVE_IDENTITY_PATH: &str = "/rpc/v1/resolve_identity";
pub const RESOLVE_ROLE_PATH: &str = "/rpc/v1/resolve_role";
pub const PING_PATH: &str = "/rpc/v1/ping";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveIdentityRequest {
    pub session_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveIdentityResponse {
    pub user_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRoleRequest {
    pub user_id: DbId,
}

/// The role travels as its string form and is parsed by the receiver, so an
/// unknown role surfaces as a distinct error rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRoleResponse {
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
}
