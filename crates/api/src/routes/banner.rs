use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::banner;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user_banner", get(banner::user_banner))
        .route(
            "/banner",
            get(banner::list_banners).post(banner::create_banner),
        )
        .route(
            "/banner/{id}",
            patch(banner::update_banner).delete(banner::delete_banner),
        )
}
