//! Authorization bridge: session token to identity to role, via the
//! identity service.
//!
//! Checks run in order and stop at the first failure:
//!
//! 1. A session token is present, else `Unauthorized`.
//! 2. The token resolves to an identity id, else `Unauthorized` (transport
//!    failures included).
//! 3. When a role is needed, it is resolved and compared. A resolution
//!    failure is `Internal` since the caller is already authenticated; a
//!    mismatch is `Forbidden`.
//!
//! Nothing is cached: every request asks the identity service again.

use std::sync::Arc;

use banner_core::context::RequestContext;
use banner_core::error::CoreError;
use banner_core::roles::Role;
use banner_rpc::IdentityClient;

#[derive(Clone)]
pub struct AuthorizationBridge {
    identity: Arc<dyn IdentityClient>,
}

impl AuthorizationBridge {
    pub fn new(identity: Arc<dyn IdentityClient>) -> Self {
        Self { identity }
    }

    /// Stages 1 and 2.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<RequestContext, CoreError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::Unauthorized("Missing session cookie".into()))?;

        match self.identity.resolve_identity(token).await {
            Ok(identity_id) => Ok(RequestContext::authenticated(identity_id)),
            Err(e) => {
                tracing::debug!(error = %e, "Session did not resolve to an identity");
                Err(CoreError::Unauthorized("Invalid or expired session".into()))
            }
        }
    }

    /// Stage 3 without a gate: attach the caller's role.
    pub async fn resolve_role(&self, ctx: RequestContext) -> Result<RequestContext, CoreError> {
        let identity_id = ctx
            .identity_id
            .ok_or_else(|| CoreError::Unauthorized("Request is not authenticated".into()))?;

        let role = self
            .identity
            .resolve_role(identity_id)
            .await
            .map_err(|e| CoreError::Internal(format!("Role resolution failed: {e}")))?;
        Ok(ctx.with_role(role))
    }

    /// Stage 3 with a gate.
    pub async fn require_role(
        &self,
        ctx: RequestContext,
        required: Role,
    ) -> Result<RequestContext, CoreError> {
        let ctx = self.resolve_role(ctx).await?;
        if ctx.role != Some(required) {
            return Err(CoreError::Forbidden(format!("{required} role required")));
        }
        Ok(ctx)
    }

    /// Liveness of the identity service.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.identity.ping().await.map_err(CoreError::from)
    }
}
