//! HTTP-level tests for signup, signin and logout.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, post_with_cookie, set_cookie_pair, test_service};
use serde_json::json;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_returns_login() {
    let app = build_test_app(test_service());
    let response = post_json(app, "/signup", json!({"login": "alice", "password": "pw1"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["login"], "alice");
}

#[tokio::test]
async fn duplicate_signup_is_conflict() {
    let service = test_service();
    let first = post_json(
        build_test_app(service.clone()),
        "/signup",
        json!({"login": "alice", "password": "pw1"}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        build_test_app(service),
        "/signup",
        json!({"login": "alice", "password": "pw2"}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[tokio::test]
async fn signup_rejects_non_alphanumeric_login() {
    let app = build_test_app(test_service());
    let response = post_json(app, "/signup", json!({"login": "al-ice", "password": "pw"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = build_test_app(test_service());
    let response = post_json(app, "/signup", json!({"login": "alice"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = build_test_app(test_service());
    let response = get(app, "/signup").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Signin / logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signin_sets_session_cookie() {
    let service = test_service();
    service.signup("alice", "pw1").await.unwrap();

    let response = post_json(
        build_test_app(service),
        "/signin",
        json!({"login": "alice", "password": "pw1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let header = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(header.starts_with("session_id="));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("Expires="));
    assert_eq!(body_json(response).await["data"]["login"], "alice");
}

#[tokio::test]
async fn signin_failures_are_indistinguishable() {
    let service = test_service();
    service.signup("alice", "pw1").await.unwrap();

    let wrong = post_json(
        build_test_app(service.clone()),
        "/signin",
        json!({"login": "alice", "password": "nope"}),
    )
    .await;
    let unknown = post_json(
        build_test_app(service),
        "/signin",
        json!({"login": "bob", "password": "pw1"}),
    )
    .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await, body_json(unknown).await);
}

#[tokio::test]
async fn logout_ends_session_once() {
    let service = test_service();
    service.signup("alice", "pw1").await.unwrap();
    let signin = post_json(
        build_test_app(service.clone()),
        "/signin",
        json!({"login": "alice", "password": "pw1"}),
    )
    .await;
    let cookie = set_cookie_pair(&signin);

    let first = post_with_cookie(build_test_app(service.clone()), "/logout", &cookie).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(first.headers()[SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let second = post_with_cookie(build_test_app(service), "/logout", &cookie).await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_cookie_is_unauthorized() {
    let app = build_test_app(test_service());
    let response = post_with_cookie(app, "/logout", "theme=dark").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok_with_request_id() {
    let app = build_test_app(test_service());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}
