//! Identity RPC contract shared by the identity service (server side) and
//! the content service (client side).
//!
//! The transport is unary JSON over HTTP: one `POST` per call on a pooled
//! keep-alive connection. [`IdentityClient`] is the seam the content
//! service's authorization bridge depends on.

use async_trait::async_trait;
use banner_core::roles::Role;
use banner_core::types::DbId;

pub mod client;
pub mod error;
pub mod wire;

pub use client::HttpIdentityClient;
pub use error::RpcError;

/// Session token to identity, identity to role.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Resolve a session token to the owning identity id.
    /// Unknown or expired tokens are [`RpcError::NotFound`].
    async fn resolve_identity(&self, session_token: &str) -> Result<DbId, RpcError>;

    /// Resolve an identity id to its role.
    async fn resolve_role(&self, user_id: DbId) -> Result<Role, RpcError>;

    /// Liveness check used at startup.
    async fn ping(&self) -> Result<(), RpcError>;
}
