//! Gate behavior on protected routes, plus malformed query strings and path
//! ids. Every request here is answered before the database is touched, so
//! the app runs against an unconnected pool.

mod common;

use axum::http::StatusCode;
use common::{TEST_JWT_SECRET, send, send_with_header, setup_offline_app, test_jwt_config};
use folio::folio_auth::{Role, create_access_token, create_access_token_at};
use folio::folio_config::JwtConfig;
use serde_json::json;

fn user_token() -> String {
    create_access_token("u1", Role::User, &test_jwt_config()).unwrap()
}

fn expired_token() -> String {
    let issued_at = chrono::Utc::now().timestamp() - 7200;
    create_access_token_at("u1", Role::Admin, &test_jwt_config(), issued_at).unwrap()
}

#[tokio::test]
async fn test_missing_token_is_401_no_token() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "POST", "/api/contents", None, Some(json!({}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "no_token");
    assert_eq!(body["error"], "No token, authorization denied");
}

#[tokio::test]
async fn test_bearer_with_empty_token_is_no_token() {
    let app = setup_offline_app();

    let (status, body) = send_with_header(&app, "GET", "/api/users/me", "Bearer ").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "no_token");
}

#[tokio::test]
async fn test_garbage_token_is_401_invalid_token() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/api/users/me", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_token");
    assert_eq!(body["error"], "Token is not valid");
}

#[tokio::test]
async fn test_wrong_scheme_is_invalid_token() {
    let app = setup_offline_app();

    let (status, body) =
        send_with_header(&app, "GET", "/api/users/me", "Basic dXNlcjpwYXNz").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_invalid() {
    let app = setup_offline_app();
    let other = JwtConfig::new(format!("{}-rotated", TEST_JWT_SECRET));
    let token = create_access_token("u1", Role::Admin, &other).unwrap();

    let (status, body) = send(&app, "GET", "/api/users", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_expired_token_is_401_token_expired() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/api/users", Some(&expired_token()), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "token_expired");
    assert_eq!(body["error"], "Token has expired");
}

#[tokio::test]
async fn test_user_token_on_admin_routes_is_403() {
    let app = setup_offline_app();
    let token = user_token();

    let cases = [
        ("GET", "/api/users"),
        ("GET", "/api/users/00000000-0000-0000-0000-000000000001"),
        ("DELETE", "/api/users/00000000-0000-0000-0000-000000000001"),
        ("POST", "/api/templates"),
        ("PUT", "/api/templates/00000000-0000-0000-0000-000000000001"),
        ("DELETE", "/api/templates/00000000-0000-0000-0000-000000000001"),
    ];

    for (method, uri) in cases {
        let (status, body) = send(&app, method, uri, Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(body["code"], "forbidden");
        assert_eq!(body["error"], "Forbidden");
    }
}

#[tokio::test]
async fn test_gate_runs_before_body_validation() {
    let app = setup_offline_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/templates",
        None,
        Some(json!({ "name": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "no_token");
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Welcome to the CMS Platform Backend!");

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_status_filter_is_json_400() {
    let app = setup_offline_app();

    for uri in ["/api/contents?status=bogus", "/api/contents?status="] {
        let (status, body) = send(&app, "GET", uri, None, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "bad_request");
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid query parameters")
        );
    }
}

#[tokio::test]
async fn test_non_numeric_page_is_json_400() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/api/templates?page=two", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_malformed_id_is_json_400() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/api/contents/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid path parameter")
    );

    let (status, body) = send(&app, "GET", "/api/templates/42", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    let admin = create_access_token("a1", Role::Admin, &test_jwt_config()).unwrap();
    let (status, body) = send(&app, "GET", "/api/users/not-a-uuid", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}
