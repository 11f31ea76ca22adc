//! HTTP-level integration tests for registration, login, and the
//! authenticated-user endpoint.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_201_with_no_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({"username": "somchai", "email": "somchai@example.com", "password": "sit-stay-roll-over"}),
    )
    .await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["username"], "somchai");
    assert_eq!(json["data"]["role"], "none");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({"username": "somchai", "password": "sit-stay-roll-over"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({"username": "somchai", "password": "another-password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_short_password_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({"username": "somchai", "password": "short"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_roundtrip_and_me(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({"username": "somchai", "password": "sit-stay-roll-over"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "somchai", "password": "sit-stay-roll-over"}),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    let token = json["data"]["access_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["username"], "somchai");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({"username": "somchai", "password": "sit-stay-roll-over"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "somchai", "password": "wrong-password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
