//! Handlers for `/api/v1/user_banner` and `/api/v1/banner`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use banner_core::banner::BannerView;
use banner_core::types::DbId;
use banner_core::validation::validate_positive_id;

use crate::error::AppResult;
use crate::middleware::auth::WithRole;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{BannerRequest, ListParams, UserBannerParams};
use crate::response::{CreatedBanner, DataResponse};
use crate::state::AppState;

/// GET /api/v1/user_banner
pub async fn user_banner(
    State(state): State<AppState>,
    WithRole(ctx): WithRole,
    params: Result<Query<UserBannerParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<BannerView>>> {
    let Query(params) = params?;
    let query = params.parse()?;
    let view = state.banners.user_banner(&query, &ctx).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/banner
///
/// Any authenticated caller; hidden banners are included for admins only.
pub async fn list_banners(
    State(state): State<AppState>,
    WithRole(ctx): WithRole,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<BannerView>>>> {
    let Query(params) = params?;
    let filter = params.into_filter(ctx.is_privileged())?;
    let views = state.banners.list(&filter).await?;
    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/banner
pub async fn create_banner(
    State(state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
    body: Result<Json<BannerRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedBanner>>)> {
    let Json(body) = body?;
    let input = body.into_new_banner()?;
    let banner_id = state.banners.create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedBanner { banner_id },
        }),
    ))
}

/// PATCH /api/v1/banner/{id}
pub async fn update_banner(
    State(state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
    id: Result<Path<DbId>, PathRejection>,
    body: Result<Json<BannerRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<BannerView>>> {
    let Path(id) = id?;
    validate_positive_id("id", id)?;
    let Json(body) = body?;
    let input = body.into_new_banner()?;
    let view = state.banners.update(id, &input).await?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/banner/{id}
pub async fn delete_banner(
    State(state): State<AppState>,
    RequireAdmin(_ctx): RequireAdmin,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    validate_positive_id("id", id)?;
    state.banners.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
