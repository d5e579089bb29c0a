use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub identity_healthy: bool,
}

/// GET /health -- service, database and identity service health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, identity) = tokio::join!(state.banners.ping(), state.bridge.ping());
    let db_healthy = db.is_ok();
    let identity_healthy = identity.is_ok();

    Json(HealthResponse {
        status: if db_healthy && identity_healthy {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        identity_healthy,
    })
}

/// Mount at the root, not under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
