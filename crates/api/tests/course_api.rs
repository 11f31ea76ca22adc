//! HTTP-level integration tests for the course catalog: trainer CRUD,
//! round replace-set, and the public visibility rule.

mod common;

use axum::http::StatusCode;
use common::{delete, expect_json, get, post_json, put_json, seed_trainer, seed_user, token_for};
use sqlx::PgPool;

/// Create a published course with one Mon/Wed morning round; returns its id.
async fn create_published_course(pool: &PgPool, token: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/trainer/courses",
        Some(token),
        serde_json::json!({
            "title": "Puppy Obedience",
            "description": "Basic commands and leash manners",
            "duration_hr": 10,
            "price": 4500.0,
            "deposit_price": 500.0,
            "location": "Bang Kapi training field",
            "max_dogs": 6,
            "benefits": "1) Free bath\n- Free report",
            "is_published": true,
            "rounds": [
                {"days": [0, 2], "start_time": "09:00:00", "end_time": "10:00:00"}
            ]
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Trainer CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_returns_derived_display_data(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/trainer/courses",
        Some(&token),
        serde_json::json!({
            "title": "Agility Basics",
            "duration_hr": 8,
            "benefits": "1) Free bath\n- Free report\n\n2. Follow-up call",
            "rounds": [
                {"days": [3, 1, 1], "start_time": "09:00:00", "end_time": "10:30:00"}
            ]
        }),
    )
    .await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(
        json["data"]["benefits_list"],
        serde_json::json!(["Free bath", "Free report", "Follow-up call"])
    );
    // Days deduplicated and sorted; two labels, not three.
    assert_eq!(json["data"]["rounds"][0]["days"], serde_json::json!([1, 3]));
    assert_eq!(
        json["data"]["rounds"][0]["day_labels"],
        serde_json::json!(["อังคาร", "พฤหัสบดี"])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_requires_trainer_role(pool: PgPool) {
    let user = seed_user(&pool, "somchai").await;
    let token = token_for(&user);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/trainer/courses",
        Some(&token),
        serde_json::json!({"title": "Nope", "duration_hr": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_rejects_equal_round_times(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/trainer/courses",
        Some(&token),
        serde_json::json!({
            "title": "Zero-length sessions",
            "duration_hr": 1,
            "rounds": [
                {"days": [0], "start_time": "09:00:00", "end_time": "09:00:00"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_rejects_round_days_without_times(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/trainer/courses",
        Some(&token),
        serde_json::json!({
            "title": "Missing times",
            "duration_hr": 1,
            "rounds": [{"days": [0, 2]}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_rejects_zero_duration(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/trainer/courses",
        Some(&token),
        serde_json::json!({"title": "Too quick", "duration_hr": 0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_course_round_replace_set(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);
    let course_id = create_published_course(&pool, &token).await;

    // Fetch the stored round id through the public detail view.
    let app = common::build_test_app(pool.clone());
    let json = expect_json(
        get(app, &format!("/api/v1/courses/{course_id}"), None).await,
        StatusCode::OK,
    )
    .await;
    let kept_round = json["data"]["rounds"][0]["id"].as_i64().unwrap();

    // Resubmit: edit the stored round, add a second one.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/trainer/courses/{course_id}"),
        Some(&token),
        serde_json::json!({
            "rounds": [
                {"id": kept_round, "days": [4], "start_time": "18:00:00", "end_time": "19:00:00"},
                {"days": [5], "start_time": "08:00:00", "end_time": "09:00:00"}
            ]
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["rounds"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["rounds"][0]["id"], kept_round);
    assert_eq!(json["data"]["rounds"][0]["days"], serde_json::json!([4]));

    // Resubmit without the original round: it must be deleted.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/trainer/courses/{course_id}"),
        Some(&token),
        serde_json::json!({
            "rounds": [
                {"days": [6], "start_time": "10:00:00", "end_time": "11:00:00"}
            ]
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    let rounds = json["data"]["rounds"].as_array().unwrap();
    assert_eq!(rounds.len(), 1);
    assert_ne!(rounds[0]["id"], kept_round);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_foreign_round_id(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);
    let first = create_published_course(&pool, &token).await;
    let second = create_published_course(&pool, &token).await;

    // Steal the first course's round id and submit it under the second.
    let app = common::build_test_app(pool.clone());
    let json = expect_json(
        get(app, &format!("/api/v1/courses/{first}"), None).await,
        StatusCode::OK,
    )
    .await;
    let foreign_round = json["data"]["rounds"][0]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/trainer/courses/{second}"),
        Some(&token),
        serde_json::json!({
            "rounds": [
                {"id": foreign_round, "days": [0], "start_time": "09:00:00", "end_time": "10:00:00"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_someone_elses_course_returns_404(pool: PgPool) {
    let owner = seed_trainer(&pool, "kru_somsak").await;
    let other = seed_trainer(&pool, "kru_somying").await;
    let course_id = create_published_course(&pool, &token_for(&owner)).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/trainer/courses/{course_id}"),
        Some(&token_for(&other)),
        serde_json::json!({"title": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_course_returns_204(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);
    let course_id = create_published_course(&pool, &token).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(
        app,
        &format!("/api/v1/trainer/courses/{course_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/courses/{course_id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Public visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unpublished_course_is_not_publicly_visible(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);
    let course_id = create_published_course(&pool, &token).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/trainer/courses/{course_id}/unpublish"),
        Some(&token),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/courses/{course_id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = expect_json(get(app, "/api/v1/courses", None).await, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_published_course_of_demoted_owner_disappears(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);
    let course_id = create_published_course(&pool, &token).await;

    // Still published, but the owner loses the trainer role.
    sqlx::query("UPDATE users SET role = 'none' WHERE id = $1")
        .bind(trainer.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/courses/{course_id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = expect_json(get(app, "/api/v1/courses", None).await, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_list_orders_newest_first(pool: PgPool) {
    let trainer = seed_trainer(&pool, "kru_somsak").await;
    let token = token_for(&trainer);
    let first = create_published_course(&pool, &token).await;
    let second = create_published_course(&pool, &token).await;

    let app = common::build_test_app(pool);
    let json = expect_json(get(app, "/api/v1/courses", None).await, StatusCode::OK).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}
