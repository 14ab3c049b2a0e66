use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use learnbase_api::config::ServerConfig;
use learnbase_api::extract::TENANT_HEADER;
use learnbase_api::router::build_app_router;
use learnbase_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through the same `build_app_router` as `main.rs`, so integration
/// tests exercise the exact production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        shutdown: CancellationToken::new(),
    };
    build_app_router(state)
}

fn request(method: &str, uri: &str, tenant: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if !tenant.is_empty() {
        builder = builder.header(TENANT_HEADER, tenant);
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a GET request with the given tenant header (`""` omits it).
pub async fn get(app: Router, uri: &str, tenant: &str) -> Response {
    app.oneshot(request("GET", uri, tenant, None)).await.unwrap()
}

/// Send a POST request with a JSON body.
#[allow(dead_code)] // not every test binary posts
pub async fn post_json(
    app: Router,
    uri: &str,
    tenant: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(request("POST", uri, tenant, Some(body)))
        .await
        .unwrap()
}

/// Send a PUT request with a JSON body.
#[allow(dead_code)]
pub async fn put_json(app: Router, uri: &str, tenant: &str, body: serde_json::Value) -> Response {
    app.oneshot(request("PUT", uri, tenant, Some(body)))
        .await
        .unwrap()
}

/// Send a DELETE request.
#[allow(dead_code)]
pub async fn delete(app: Router, uri: &str, tenant: &str) -> Response {
    app.oneshot(request("DELETE", uri, tenant, None))
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers (all through the public API)
// ---------------------------------------------------------------------------

/// Create a user and return its id.
#[allow(dead_code)]
pub async fn seed_user(pool: &PgPool, tenant: &str, name: &str, email: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/users",
        tenant,
        serde_json::json!({"display_name": name, "email": email}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a department and return its id.
#[allow(dead_code)]
pub async fn seed_department(pool: &PgPool, tenant: &str, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/departments",
        tenant,
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Add a user to a department.
#[allow(dead_code)]
pub async fn seed_membership(pool: &PgPool, tenant: &str, department_id: i64, user_id: i64) {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/departments/{department_id}/members"),
        tenant,
        serde_json::json!({"user_id": user_id}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::NO_CONTENT);
}

/// Create a training (draft) and return its id.
#[allow(dead_code)]
pub async fn seed_training(pool: &PgPool, tenant: &str, title: &str, created_by: i64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/trainings",
        tenant,
        serde_json::json!({"title": title, "created_by": created_by}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Fan a training out to the given targets and return the outcome payload.
#[allow(dead_code)]
pub async fn fan_out(
    pool: &PgPool,
    tenant: &str,
    training_id: i64,
    targets: serde_json::Value,
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/assignments",
        tenant,
        serde_json::json!({
            "subject_kind": "training",
            "subject_id": training_id,
            "targets": targets,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
