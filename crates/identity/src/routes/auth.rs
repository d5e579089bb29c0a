use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Public account routes.
///
/// ```text
/// POST /signup   -> signup
/// POST /signin   -> signin
/// POST /logout   -> logout (requires session cookie)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/logout", post(auth::logout))
}
