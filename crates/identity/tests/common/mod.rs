#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use banner_core::retry::RetryPolicy;
use banner_db::memory::{MemoryCacheStore, MemoryIdentityRepo};
use http_body_util::BodyExt;
use tower::ServiceExt;

use banner_identity::config::{ServerConfig, SessionBackend};
use banner_identity::service::IdentityService;
use banner_identity::session::SessionStore;
use banner_identity::state::AppState;

/// A config that never touches the environment.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        rpc_port: 0,
        database_url: String::new(),
        session_backend: SessionBackend::Memory,
        session_ttl: Duration::from_secs(3600),
        session_purge_interval: Duration::from_secs(60),
        connect_retry: RetryPolicy {
            max_attempts: 1,
            delay: Duration::from_millis(1),
        },
        request_timeout_secs: 30,
        cors_origins: vec!["http://localhost:5173".to_string()],
        cookie_secure: false,
        admin_login: None,
        admin_password: None,
    }
}

/// In-memory identity service.
pub fn test_service() -> Arc<IdentityService> {
    Arc::new(IdentityService::new(
        Arc::new(MemoryIdentityRepo::new()),
        SessionStore::new(Arc::new(MemoryCacheStore::new()), Duration::from_secs(3600)),
    ))
}

pub fn test_state(service: Arc<IdentityService>) -> AppState {
    AppState {
        service,
        config: Arc::new(test_config()),
    }
}

pub fn build_test_app(service: Arc<IdentityService>) -> Router {
    banner_identity::router::build_app_router(test_state(service), &test_config())
}

pub fn build_test_rpc(service: Arc<IdentityService>) -> Router {
    banner_identity::router::build_rpc_router(test_state(service), &test_config())
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

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// The `name=value` pair of the first `Set-Cookie` header.
pub fn set_cookie_pair(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie should be present")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}
