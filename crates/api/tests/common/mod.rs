//! Shared fixtures and request helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener. Each test gets its own database via
//! `#[sqlx::test]`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pawclass_api::auth::jwt::{generate_access_token, JwtConfig};
use pawclass_api::config::ServerConfig;
use pawclass_api::router::build_app_router;
use pawclass_api::state::AppState;
use pawclass_api::storage::FileStore;
use pawclass_db::models::user::{CreateUser, User};
use pawclass_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: std::env::temp_dir().join("pawclass-test-media"),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let files = Arc::new(FileStore::new(config.media_root.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        files,
    };

    build_app_router(state, &config)
}

/* --------------------------------------------------------------------------
Fixtures
-------------------------------------------------------------------------- */

/// Insert a user with no granted role. The password hash is a placeholder;
/// token-based tests never log in through it.
pub async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .expect("seed user")
}

/// Insert a user holding the trainer role.
pub async fn seed_trainer(pool: &PgPool, username: &str) -> User {
    let user = seed_user(pool, username).await;
    UserRepo::set_role(pool, user.id, "trainer")
        .await
        .expect("set trainer role");
    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("reload trainer")
        .expect("trainer exists")
}

/// Insert an administrator.
pub async fn seed_admin(pool: &PgPool, username: &str) -> User {
    let user = seed_user(pool, username).await;
    sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("set admin flag");
    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("reload admin")
        .expect("admin exists")
}

/// Mint an access token for a seeded user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).expect("token generation")
}

/* --------------------------------------------------------------------------
Request helpers
-------------------------------------------------------------------------- */

fn with_auth(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

/// Send a GET request, optionally authenticated.
pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response {
    let request = with_auth(Request::builder().method("GET").uri(path), token)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, optionally authenticated.
pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let request = with_auth(Request::builder().method("POST").uri(path), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body, optionally authenticated.
pub async fn put_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let request = with_auth(Request::builder().method("PUT").uri(path), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request, optionally authenticated.
pub async fn delete(app: Router, path: &str, token: Option<&str>) -> Response {
    let request = with_auth(Request::builder().method("DELETE").uri(path), token)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a hand-rolled multipart body.
///
/// `fields` are plain text parts; `file` is an optional
/// `(field_name, filename, bytes)` part.
pub async fn post_multipart(
    app: Router,
    path: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Response {
    let boundary = "pawclass-test-boundary";
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let request = with_auth(Request::builder().method("POST").uri(path), token)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON (null when empty or not JSON).
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// Assert a status and return the parsed JSON body in one step.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
