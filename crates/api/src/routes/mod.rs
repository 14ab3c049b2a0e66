pub mod analytics;
pub mod assignments;
pub mod departments;
pub mod evaluations;
pub mod health;
pub mod trainings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                           list, create
/// /users/{id}                                      get, update, delete
///
/// /departments                                     list, create
/// /departments/{id}                                get, update, delete
/// /departments/{id}/members                        list, add (POST)
/// /departments/{id}/members/{user_id}              remove (DELETE)
///
/// /trainings                                       list (?status), create
/// /trainings/{id}                                  get, update
/// /trainings/{id}/publish                          publish (POST)
/// /trainings/{id}/archive                          archive (POST)
/// /trainings/{id}/contents                         list, add
/// /trainings/{id}/questions                        list, add
///
/// /evaluations                                     list (?status), create
/// /evaluations/{id}                                get, update
/// /evaluations/{id}/questions                      list, add
///
/// /assignments                                     fan-out (POST), list
/// /assignments/{id}                                get
/// /assignments/{id}/start                          mark started (POST)
/// /assignments/{id}/complete                       record completion (POST)
/// /assignments/{id}/responses                      list, record answer
///
/// /analytics/status-counts                         per-status totals (GET)
/// /analytics/completion-rate                       scope or subject rate (GET)
/// /analytics/score-distribution                    bucketed scores (GET)
/// /analytics/department-performance                ranked departments (GET)
/// /analytics/monthly-trend                         gap-free series (GET)
/// /analytics/difficult-questions                   hardest questions (GET)
/// ```
///
/// Every route except `/health` expects the `x-tenant-id` header.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Entity management.
        .nest("/users", users::router())
        .nest("/departments", departments::router())
        .nest("/trainings", trainings::router())
        .nest("/evaluations", evaluations::router())
        // Assignment fan-out and per-assignment progress.
        .nest("/assignments", assignments::router())
        // Read-only aggregation endpoints.
        .nest("/analytics", analytics::router())
}
