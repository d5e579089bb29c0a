//! HTTP-level tests for the banner endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_cookie, body_json, build_test_app, create_banner, get, identity_service, send,
    user_cookie,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_banner_returns_latest_content() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 300);
    let admin = admin_cookie(&identity).await;
    let user = user_cookie(&identity, "alice").await;

    let id = create_banner(&app, &admin, 2, &[1, 3], "hello", true).await;

    let response = get(
        &app,
        "/api/v1/user_banner?tag_id=3&feature_id=2&use_last_revision=true",
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["banner_id"], id);
    assert_eq!(json["data"]["content"], json!({ "title": "hello" }));
    assert_eq!(json["data"]["tag_ids"], json!([1, 3]));
}

#[tokio::test]
async fn settled_read_does_not_see_fresh_banner() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 300);
    let admin = admin_cookie(&identity).await;
    create_banner(&app, &admin, 2, &[1], "hello", true).await;

    for uri in [
        "/api/v1/user_banner?tag_id=1&feature_id=2",
        "/api/v1/user_banner?tag_id=1&feature_id=2&use_last_revision=false",
    ] {
        let response = get(&app, uri, &admin).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn settled_read_without_staleness_sees_banner() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;
    let user = user_cookie(&identity, "alice").await;
    create_banner(&app, &admin, 2, &[1], "hello", true).await;

    let response = get(&app, "/api/v1/user_banner?tag_id=1&feature_id=2", &user).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["content"]["title"], "hello");
}

#[tokio::test]
async fn unknown_pair_is_not_found() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let user = user_cookie(&identity, "alice").await;

    let response = get(&app, "/api/v1/user_banner?tag_id=1&feature_id=2", &user).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hidden_banner_is_visible_to_admin_only() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;
    let user = user_cookie(&identity, "alice").await;

    create_banner(&app, &admin, 2, &[1], "visible", true).await;
    let hidden = create_banner(&app, &admin, 2, &[2], "hidden", false).await;

    let uri = "/api/v1/user_banner?tag_id=2&feature_id=2&use_last_revision=true";
    assert_eq!(get(&app, uri, &user).await.status(), StatusCode::NOT_FOUND);

    let response = get(&app, uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["banner_id"], hidden);
    assert_eq!(json["data"]["is_active"], false);

    let user_list = body_json(get(&app, "/api/v1/banner?feature_id=2", &user).await).await;
    assert_eq!(user_list["data"].as_array().unwrap().len(), 1);
    assert_eq!(user_list["data"][0]["content"]["title"], "visible");

    let admin_list = body_json(get(&app, "/api/v1/banner?feature_id=2", &admin).await).await;
    assert_eq!(admin_list["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_filters_and_pages_by_id() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;

    let a = create_banner(&app, &admin, 1, &[1], "a", true).await;
    let b = create_banner(&app, &admin, 1, &[2], "b", true).await;
    let c = create_banner(&app, &admin, 2, &[1], "c", true).await;

    let all = body_json(get(&app, "/api/v1/banner", &admin).await).await;
    let ids: Vec<i64> = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["banner_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b, c]);

    let page = body_json(get(&app, "/api/v1/banner?limit=1&offset=1", &admin).await).await;
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["banner_id"], b);

    let by_tag = body_json(get(&app, "/api/v1/banner?tag_id=1", &admin).await).await;
    let ids: Vec<i64> = by_tag["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["banner_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, c]);

    let by_feature = body_json(get(&app, "/api/v1/banner?feature_id=1&tag_id=2,5", &admin).await).await;
    assert_eq!(by_feature["data"].as_array().unwrap().len(), 1);
    assert_eq!(by_feature["data"][0]["banner_id"], b);
}

// ---------------------------------------------------------------------------
// Boundary validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_parameters_are_rejected() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let user = user_cookie(&identity, "alice").await;

    for uri in [
        "/api/v1/user_banner?tag_id=0&feature_id=2",
        "/api/v1/user_banner?tag_id=1&feature_id=-1",
        "/api/v1/user_banner?tag_id=abc&feature_id=2",
        "/api/v1/user_banner?feature_id=2",
        "/api/v1/user_banner?tag_id=1&feature_id=2&use_last_revision=maybe",
        "/api/v1/banner?limit=0",
        "/api/v1/banner?offset=-1",
        "/api/v1/banner?tag_id=1,x",
    ] {
        let response = get(&app, uri, &user).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR", "{uri}");
    }
}

#[tokio::test]
async fn invalid_banner_bodies_are_rejected() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;

    for body in [
        json!({ "tag_ids": [], "feature_id": 1, "content": {} }),
        json!({ "tag_ids": [0], "feature_id": 1, "content": {} }),
        json!({ "tag_ids": [1], "feature_id": 0, "content": {} }),
        json!({ "tag_ids": [1], "feature_id": 1, "content": "text" }),
    ] {
        let response = send(&app, Method::POST, "/api/v1/banner", Some(&admin), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let response = send(
        &app,
        Method::POST,
        "/api/v1/banner",
        Some(&admin),
        Some(json!({ "feature_id": 1 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn bad_path_ids_are_rejected() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;

    let response = send(&app, Method::DELETE, "/api/v1/banner/abc", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Method::DELETE, "/api/v1/banner/0", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;

    let response = send(&app, Method::PUT, "/api/v1/banner", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = send(&app, Method::POST, "/api/v1/user_banner", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// Authentication and roles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_or_unknown_session_is_unauthorized() {
    let identity = identity_service();
    let app = build_test_app(identity, 0);

    let response = send(&app, Method::GET, "/api/v1/banner", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get(
        &app,
        "/api/v1/user_banner?tag_id=1&feature_id=2",
        "session_id=nosuchtoken",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_cannot_write() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;
    let user = user_cookie(&identity, "alice").await;
    let id = create_banner(&app, &admin, 2, &[1], "hello", true).await;

    let body = json!({ "tag_ids": [1], "feature_id": 3, "content": {} });
    let response = send(&app, Method::POST, "/api/v1/banner", Some(&user), Some(body.clone())).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let uri = format!("/api/v1/banner/{id}");
    let response = send(&app, Method::PATCH, &uri, Some(&user), Some(body)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, Method::DELETE, &uri, Some(&user), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The banner is untouched.
    let response = get(
        &app,
        "/api/v1/user_banner?tag_id=1&feature_id=2&use_last_revision=true",
        &user,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlapping_pair_is_conflict() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;
    create_banner(&app, &admin, 2, &[1, 2], "first", true).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/banner",
        Some(&admin),
        Some(json!({ "tag_ids": [2, 3], "feature_id": 2, "content": {} })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    // Same tags under another feature are fine.
    create_banner(&app, &admin, 3, &[2, 3], "second", true).await;
}

#[tokio::test]
async fn update_replaces_active_revision() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;
    let user = user_cookie(&identity, "alice").await;
    let id = create_banner(&app, &admin, 2, &[1], "v1", true).await;

    let response = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/banner/{id}"),
        Some(&admin),
        Some(json!({ "tag_ids": [1, 4], "feature_id": 2, "content": { "title": "v2" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["banner_id"], id);
    assert_eq!(json["data"]["content"]["title"], "v2");
    assert_eq!(json["data"]["tag_ids"], json!([1, 4]));

    let response = get(
        &app,
        "/api/v1/user_banner?tag_id=4&feature_id=2&use_last_revision=true",
        &user,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["content"]["title"], "v2");

    // Still a single banner in the listing.
    let list = body_json(get(&app, "/api/v1/banner", &admin).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_unknown_banner_is_not_found() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;

    let response = send(
        &app,
        Method::PATCH,
        "/api/v1/banner/999",
        Some(&admin),
        Some(json!({ "tag_ids": [1], "feature_id": 2, "content": {} })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_banner() {
    let identity = identity_service();
    let app = build_test_app(identity.clone(), 0);
    let admin = admin_cookie(&identity).await;
    let id = create_banner(&app, &admin, 2, &[1], "bye", true).await;
    let uri = format!("/api/v1/banner/{id}");

    let response = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        &app,
        "/api/v1/user_banner?tag_id=1&feature_id=2&use_last_revision=true",
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The pair is free again.
    create_banner(&app, &admin, 2, &[1], "again", true).await;
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_dependencies() {
    let app = build_test_app(identity_service(), 0);
    let response = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["identity_healthy"], true);
}
