//! Role-gated extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use banner_core::context::RequestContext;
use banner_core::roles::Role;

use super::auth::Authenticated;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub RequestContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(ctx) = Authenticated::from_request_parts(parts, state).await?;
        let ctx = state.bridge.require_role(ctx, Role::Admin).await?;
        Ok(RequireAdmin(ctx))
    }
}
