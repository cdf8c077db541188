//! HTTP-level integration tests for the `/habits` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get_auth, login_user, patch_json_auth,
    post_json, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

/// Log in a fresh user and return their access token.
async fn access_token_for(app: axum::Router, pool: &PgPool, username: &str) -> String {
    let (_user, password) = create_test_user(pool, username).await;
    let login = login_user(app, username, &password).await;
    login["accessToken"].as_str().unwrap().to_string()
}

/// Create a habit via the API and return its id.
async fn create_habit(app: axum::Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name, "target": 3, "priority": "high" });
    let response = post_json_auth(app, "/api/v1/habits", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Creating a habit returns 201 with defaults applied.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_habit_with_defaults(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token_for(app.clone(), &pool, "creator").await;

    let body = serde_json::json!({ "name": "Read 20 pages", "target": 1 });
    let response = post_json_auth(app, "/api/v1/habits", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Read 20 pages");
    assert_eq!(json["data"]["target"], 1);
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["notes"], "");
}

/// A target below 1 is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_habit_rejects_invalid_target(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token_for(app.clone(), &pool, "badtarget").await;

    let body = serde_json::json!({ "name": "Sleep", "target": 0 });
    let response = post_json_auth(app, "/api/v1/habits", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Target must be at least 1");
}

/// A blank name is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_habit_rejects_blank_name(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token_for(app.clone(), &pool, "noname").await;

    let body = serde_json::json!({ "name": "   ", "target": 1 });
    let response = post_json_auth(app, "/api/v1/habits", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Habit name is required");
}

/// Listing returns only the caller's habits.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_habits_is_scoped_to_owner(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token_a = access_token_for(app.clone(), &pool, "owner_a").await;
    let token_b = access_token_for(app.clone(), &pool, "owner_b").await;

    create_habit(app.clone(), &token_a, "A's habit").await;
    create_habit(app.clone(), &token_b, "B's habit").await;

    let response = get_auth(app, "/api/v1/habits", &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let habits = json["data"].as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["name"], "A's habit");
}

/// Fetching someone else's habit behaves like a missing row.
#[sqlx::test(migrations = "../db/migrations")]
async fn cross_user_access_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token_a = access_token_for(app.clone(), &pool, "victim").await;
    let token_b = access_token_for(app.clone(), &pool, "intruder").await;

    let id = create_habit(app.clone(), &token_a, "Private habit").await;

    let response = get_auth(app.clone(), &format!("/api/v1/habits/{id}"), &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({ "name": "Hijacked" });
    let response =
        patch_json_auth(app.clone(), &format!("/api/v1/habits/{id}"), body, &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/v1/habits/{id}"), &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Update applies only the provided fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_habit_partial(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token_for(app.clone(), &pool, "updater").await;
    let id = create_habit(app.clone(), &token, "Run").await;

    let body = serde_json::json!({ "target": 5 });
    let response = patch_json_auth(app, &format!("/api/v1/habits/{id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Run");
    assert_eq!(json["data"]["target"], 5);
    assert_eq!(json["data"]["priority"], "high");
}

/// Delete removes the habit; a second delete returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_habit_then_gone(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token_for(app.clone(), &pool, "deleter").await;
    let id = create_habit(app.clone(), &token, "Doomed").await;

    let response = delete_auth(app.clone(), &format!("/api/v1/habits/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app.clone(), &format!("/api/v1/habits/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, &format!("/api/v1/habits/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// All habit endpoints require authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn habits_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/habits").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = serde_json::json!({ "name": "Nope", "target": 1 });
    let response = post_json(app, "/api/v1/habits", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Recording the same day twice overwrites rather than duplicating.
#[sqlx::test(migrations = "../db/migrations")]
async fn progress_upsert_is_idempotent_per_day(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = access_token_for(app.clone(), &pool, "tracker").await;
    let id = create_habit(app.clone(), &token, "Meditate").await;
    let uri = format!("/api/v1/habits/{id}/progress");

    let body = serde_json::json!({ "day": "2026-08-01", "completed": true });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same day again, flipped to false.
    let body = serde_json::json!({ "day": "2026-08-01", "completed": false });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "day": "2026-08-02", "completed": true });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2, "one row per day, not per write");
    assert_eq!(entries[0]["day"], "2026-08-01");
    assert_eq!(entries[0]["completed"], false);
    assert_eq!(entries[1]["day"], "2026-08-02");
    assert_eq!(entries[1]["completed"], true);
}

/// Progress on someone else's habit is 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn progress_is_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token_a = access_token_for(app.clone(), &pool, "progowner").await;
    let token_b = access_token_for(app.clone(), &pool, "progother").await;
    let id = create_habit(app.clone(), &token_a, "Stretch").await;

    let body = serde_json::json!({ "day": "2026-08-01", "completed": true });
    let response =
        put_json_auth(app, &format!("/api/v1/habits/{id}/progress"), body, &token_b).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
