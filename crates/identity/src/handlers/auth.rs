//! Handlers for `/signup`, `/signin` and `/logout`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use banner_core::cookie::{cleared_session_cookie, find_cookie, session_cookie, SESSION_COOKIE};
use banner_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::{DataResponse, SigninResponse, SignupResponse};
use crate::state::AppState;

/// Request body for `POST /signup` and `POST /signin`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub login: String,
    pub password: String,
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    input: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<SignupResponse>>> {
    let Json(input) = input?;
    let identity = state.service.signup(&input.login, &input.password).await?;
    Ok(Json(DataResponse {
        data: SignupResponse {
            login: identity.login,
        },
    }))
}

/// POST /signin
///
/// Sets the session cookie on success.
pub async fn signin(
    State(state): State<AppState>,
    input: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = input?;
    let session = state.service.signin(&input.login, &input.password).await?;

    let cookie = session_cookie(&session.token, session.expires_at, state.config.cookie_secure);
    let body = DataResponse {
        data: SigninResponse {
            login: session.login,
            expires_at: session.expires_at,
        },
    };
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)))
}

/// POST /logout
///
/// Requires an active session; clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let token = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| find_cookie(h, SESSION_COOKIE))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoreError::Unauthorized("Missing session cookie".into()))?;

    state.service.logout(token).await?;

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, cleared_session_cookie(state.config.cookie_secure))]),
    ))
}
