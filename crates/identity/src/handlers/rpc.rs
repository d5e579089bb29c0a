//! Handlers for the internal identity RPC surface.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use banner_rpc::wire::{
    PingResponse, ResolveIdentityRequest, ResolveIdentityResponse, ResolveRoleRequest,
    ResolveRoleResponse,
};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /rpc/v1/resolve_identity
pub async fn resolve_identity(
    State(state): State<AppState>,
    input: Result<Json<ResolveIdentityRequest>, JsonRejection>,
) -> AppResult<Json<ResolveIdentityResponse>> {
    let Json(input) = input?;
    let user_id = state.service.resolve_identity(&input.session_token).await?;
    Ok(Json(ResolveIdentityResponse { user_id }))
}

/// POST /rpc/v1/resolve_role
pub async fn resolve_role(
    State(state): State<AppState>,
    input: Result<Json<ResolveRoleRequest>, JsonRejection>,
) -> AppResult<Json<ResolveRoleResponse>> {
    let Json(input) = input?;
    let role = state.service.resolve_role(input.user_id).await?;
    Ok(Json(ResolveRoleResponse {
        role: role.to_string(),
    }))
}

/// GET /rpc/v1/ping
pub async fn ping(State(state): State<AppState>) -> AppResult<Json<PingResponse>> {
    state.service.ping().await?;
    Ok(Json(PingResponse {
        status: "ok".into(),
    }))
}
