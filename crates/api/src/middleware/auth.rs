//! Session-cookie authentication extractors.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use banner_core::context::RequestContext;
use banner_core::cookie::{find_cookie, SESSION_COOKIE};

use crate::error::AppError;
use crate::state::AppState;

/// The raw session token from the `Cookie` header, if any.
pub fn session_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| find_cookie(header, SESSION_COOKIE))
}

/// Caller whose session resolved to an identity. The role is not resolved.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub RequestContext);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = state.bridge.authenticate(session_token(parts)).await?;
        Ok(Authenticated(ctx))
    }
}

/// Authenticated caller with a resolved role, not gated on any role.
///
/// ```ignore
/// async fn read(WithRole(ctx): WithRole) -> AppResult<Json<()>> {
///     let hidden_visible = ctx.is_privileged();
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WithRole(pub RequestContext);

impl FromRequestParts<AppState> for WithRole {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(ctx) = Authenticated::from_request_parts(parts, state).await?;
        let ctx = state.bridge.resolve_role(ctx).await?;
        Ok(WithRole(ctx))
    }
}
