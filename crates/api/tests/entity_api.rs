//! HTTP-level integration tests for entity endpoints: users, departments,
//! trainings, evaluations, and tenant scoping at the API boundary.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Tenant header contract
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_tenant_header_is_rejected(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/users", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_tenant_header_is_rejected(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/users", "not-a-number").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unscoped_write_is_rejected(pool: PgPool) {
    // '*' grants platform-wide reads; stored rows still need a concrete owner.
    let response = post_json(
        build_test_app(pool),
        "/api/v1/users",
        "*",
        serde_json::json!({"display_name": "Root", "email": "root@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// User CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_returns_201(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/users",
        "1",
        serde_json::json!({"display_name": "Ada", "email": "ada@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["display_name"], "Ada");
    assert_eq!(json["tenant_id"], 1);
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_email_is_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/users",
        "1",
        serde_json::json!({"display_name": "Ada", "email": "not-an-email"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_invisible_across_tenants(pool: PgPool) {
    let id = common::seed_user(&pool, "1", "Ada", "ada@example.com").await;

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/users/{id}"), "2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The unscoped view still sees it.
    let response = get(build_test_app(pool), &format!("/api/v1/users/{id}"), "*").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_user(pool: PgPool) {
    let id = common::seed_user(&pool, "1", "Ada", "ada@example.com").await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/users/{id}"), "1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/users/{id}"), "1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Department membership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_department_membership_roundtrip(pool: PgPool) {
    let user_id = common::seed_user(&pool, "1", "Ada", "ada@example.com").await;
    let dept_id = common::seed_department(&pool, "1", "Engineering").await;
    common::seed_membership(&pool, "1", dept_id, user_id).await;

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/departments/{dept_id}/members"),
        "1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["user_id"], user_id);

    // Removing the member empties the listing.
    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/departments/{dept_id}/members/{user_id}"),
        "1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/departments/{dept_id}/members"),
        "1",
    )
    .await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_membership_not_created_across_tenants(pool: PgPool) {
    let foreign_user = common::seed_user(&pool, "2", "Eve", "eve@example.com").await;
    let dept_id = common::seed_department(&pool, "1", "Engineering").await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/departments/{dept_id}/members"),
        "1",
        serde_json::json!({"user_id": foreign_user}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Training lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_training_starts_as_draft(pool: PgPool) {
    let creator = common::seed_user(&pool, "1", "Admin", "admin@example.com").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/trainings",
        "1",
        serde_json::json!({"title": "Onboarding", "created_by": creator}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "draft");
    assert_eq!(json["difficulty"], "beginner");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_is_idempotent_and_archive_is_terminal(pool: PgPool) {
    let creator = common::seed_user(&pool, "1", "Admin", "admin@example.com").await;
    let id = common::seed_training(&pool, "1", "Onboarding", creator).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/trainings/{id}/publish"),
        "1",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "published");

    // Publishing a published training is a no-op, not an error.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/trainings/{id}/publish"),
        "1",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "published");

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/trainings/{id}/archive"),
        "1",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(body_json(response).await["status"], "archived");

    // Archived is terminal: publishing it is an invalid argument.
    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/trainings/{id}/publish"),
        "1",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_invisible_across_tenants(pool: PgPool) {
    let creator = common::seed_user(&pool, "1", "Admin", "admin@example.com").await;
    let id = common::seed_training(&pool, "1", "Onboarding", creator).await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/trainings/{id}/publish"),
        "2",
        serde_json::json!({}),
    )
    .await;
    // Missing and foreign are indistinguishable on purpose.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_training_fields(pool: PgPool) {
    let creator = common::seed_user(&pool, "1", "Admin", "admin@example.com").await;
    let id = common::seed_training(&pool, "1", "Original", creator).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/trainings/{id}"),
        "1",
        serde_json::json!({"title": "Updated", "duration_minutes": 90}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Updated");
    assert_eq!(json["duration_minutes"], 90);
    assert_eq!(json["status"], "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_training_contents_ordered(pool: PgPool) {
    let creator = common::seed_user(&pool, "1", "Admin", "admin@example.com").await;
    let id = common::seed_training(&pool, "1", "Onboarding", creator).await;

    for (index, title) in [(1, "Second"), (0, "First")] {
        let response = post_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/trainings/{id}/contents"),
            "1",
            serde_json::json!({"title": title, "kind": "text", "order_index": index}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/trainings/{id}/contents"),
        "1",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json[0]["title"], "First");
    assert_eq!(json[1]["title"], "Second");
}

// ---------------------------------------------------------------------------
// Evaluations and questions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_evaluation_with_questions(pool: PgPool) {
    let creator = common::seed_user(&pool, "1", "Admin", "admin@example.com").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/evaluations",
        "1",
        serde_json::json!({"title": "Safety Quiz", "created_by": creator}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let evaluation = body_json(response).await;
    assert_eq!(evaluation["status"], "draft");
    assert_eq!(evaluation["passing_score"], 60.0);
    let eval_id = evaluation["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/evaluations/{eval_id}/questions"),
        "1",
        serde_json::json!({
            "text": "Fire exits are located where?",
            "kind": "single_choice",
            "order_index": 0,
            "options": [
                {"text": "Marked doors", "is_correct": true},
                {"text": "Anywhere"},
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/evaluations/{eval_id}/questions"),
        "1",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["options"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_evaluation_rejects_foreign_training_association(pool: PgPool) {
    let creator = common::seed_user(&pool, "2", "Admin", "admin2@example.com").await;
    let foreign_training = common::seed_training(&pool, "2", "Their course", creator).await;

    let me = common::seed_user(&pool, "1", "Me", "me@example.com").await;
    let response = post_json(
        build_test_app(pool),
        "/api/v1/evaluations",
        "1",
        serde_json::json!({
            "title": "Quiz",
            "training_id": foreign_training,
            "created_by": me,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
