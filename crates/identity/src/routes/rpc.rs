use axum::routing::{get, post};
use axum::Router;
use banner_rpc::wire::{PING_PATH, RESOLVE_IDENTITY_PATH, RESOLVE_ROLE_PATH};

use crate::handlers::rpc;
use crate::state::AppState;

/// Internal RPC routes, served on their own listener.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(RESOLVE_IDENTITY_PATH, post(rpc::resolve_identity))
        .route(RESOLVE_ROLE_PATH, post(rpc::resolve_role))
        .route(PING_PATH, get(rpc::ping))
}
