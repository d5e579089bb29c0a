pub mod banner;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /user_banner        GET                 (authenticated)
/// /banner             GET                 (authenticated)
///                     POST                (admin)
/// /banner/{id}        PATCH, DELETE       (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(banner::router())
}
