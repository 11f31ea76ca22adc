//! Liveness endpoint smoke test.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_returns_200(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
