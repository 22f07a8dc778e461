mod common;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, create_test_content, create_test_user, error_fields, send, setup_test_app,
};
use folio::folio_auth::Role;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users/me", Some(&user.token()), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["username"], user.username);
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_without_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "no_token");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/me/password",
        Some(&user.token()),
        Some(json!({ "current_password": TEST_PASSWORD, "new_password": "brand-new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password changed successfully");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": "brand-new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password_wrong_current(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/me/password",
        Some(&user.token()),
        Some(json!({ "current_password": "not-it", "new_password": "brand-new-pass" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Current password is incorrect");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password_too_short(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/me/password",
        Some(&user.token()),
        Some(json!({ "current_password": TEST_PASSWORD, "new_password": "short" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["new_password"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_users(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users", Some(&admin.token()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/users?username={}", user.username.to_uppercase()),
        Some(&admin.token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], user.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_cannot_list_users(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users", Some(&user.token()), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_gets_user_by_id(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let user = create_test_user(&pool, Role::User).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/users/{}", user.id),
        Some(&admin.token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], user.email);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/users/{}", Uuid::new_v4()),
        Some(&admin.token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_soft_deletes_user(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin).await;
    let user = create_test_user(&pool, Role::User).await;
    create_test_content(&pool, user.id, "left-behind", "published").await;
    let app = setup_test_app(pool.clone());
    let uri = format!("/api/users/{}", user.id);

    let (status, _) = send(&app, "DELETE", &uri, Some(&admin.token()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, Some(&admin.token()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/contents",
        Some(&user.token()),
        Some(json!({ "title": "After deletion", "body": "...", "status": "draft" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_token");

    let (status, _) = send(&app, "DELETE", &uri, Some(&admin.token()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleted_username_stays_reserved(pool: PgPool) {
    let user = create_test_user(&pool, Role::User).await;
    sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": user.username,
            "email": user.email,
            "password": "password123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let mut fields = error_fields(&body);
    fields.sort();
    assert_eq!(fields, vec!["email", "username"]);
}
