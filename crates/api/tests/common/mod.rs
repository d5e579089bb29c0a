#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use banner_core::resolver::ResolverPolicy;
use banner_core::retry::RetryPolicy;
use banner_db::memory::{MemoryCacheStore, MemoryContentRepo, MemoryIdentityRepo};
use banner_identity::service::IdentityService;
use banner_identity::session::SessionStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

use banner_api::bridge::AuthorizationBridge;
use banner_api::config::ServerConfig;
use banner_api::service::BannerService;
use banner_api::state::AppState;

pub const ADMIN_LOGIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "adminpw";

/// A config that never touches the environment.
pub fn test_config(staleness_secs: i64) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        identity_rpc_url: "http://127.0.0.1:0".to_string(),
        rpc_timeout: Duration::from_secs(1),
        staleness_secs,
        connect_retry: RetryPolicy {
            max_attempts: 1,
            delay: Duration::from_millis(1),
        },
        request_timeout_secs: 30,
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// In-memory identity service, used in-process as the identity client.
pub fn identity_service() -> Arc<IdentityService> {
    Arc::new(IdentityService::new(
        Arc::new(MemoryIdentityRepo::new()),
        SessionStore::new(Arc::new(MemoryCacheStore::new()), Duration::from_secs(3600)),
    ))
}

/// Content app over a fresh in-memory repository.
pub fn build_test_app(identity: Arc<IdentityService>, staleness_secs: i64) -> Router {
    let config = test_config(staleness_secs);
    let state = AppState {
        banners: Arc::new(BannerService::new(
            Arc::new(MemoryContentRepo::new()),
            ResolverPolicy::with_staleness_secs(staleness_secs),
        )),
        bridge: AuthorizationBridge::new(identity),
    };
    banner_api::router::build_app_router(state, &config)
}

/// Sign up `login` and return its `Cookie` header value.
pub async fn user_cookie(identity: &IdentityService, login: &str) -> String {
    identity.signup(login, "pw1").await.unwrap();
    let session = identity.signin(login, "pw1").await.unwrap();
    format!("session_id={}", session.token)
}

pub async fn admin_cookie(identity: &IdentityService) -> String {
    identity
        .ensure_admin(ADMIN_LOGIN, ADMIN_PASSWORD)
        .await
        .unwrap();
    let session = identity.signin(ADMIN_LOGIN, ADMIN_PASSWORD).await.unwrap();
    format!("session_id={}", session.token)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(cookie), None).await
}

/// Create a banner as admin and return its id.
pub async fn create_banner(
    app: &Router,
    admin: &str,
    feature_id: i64,
    tag_ids: &[i64],
    title: &str,
    is_active: bool,
) -> i64 {
    let response = send(
        app,
        Method::POST,
        "/api/v1/banner",
        Some(admin),
        Some(serde_json::json!({
            "tag_ids": tag_ids,
            "feature_id": feature_id,
            "content": { "title": title },
            "is_active": is_active,
        })),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["banner_id"]
        .as_i64()
        .expect("banner_id should be an integer")
}
