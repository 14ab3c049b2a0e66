//! Route definitions for the read-only `/analytics` query family.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`. All endpoints are GET; the tenant scope
/// comes from the `x-tenant-id` header, remaining filters from the query
/// string.
///
/// ```text
/// GET /status-counts           (?subject_kind=&department_id=&from=&until=)
/// GET /completion-rate         (?subject_kind=&subject_id=| scope filters)
/// GET /score-distribution      (?subject_kind=&subject_id=| scope filters)
/// GET /department-performance  (?department_id=&from=&until=)
/// GET /monthly-trend           (?months=&department_id=)
/// GET /difficult-questions     (?subject_kind=&subject_id=&limit=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status-counts", get(analytics::status_counts))
        .route("/completion-rate", get(analytics::completion_rate_view))
        .route(
            "/score-distribution",
            get(analytics::score_distribution_view),
        )
        .route(
            "/department-performance",
            get(analytics::department_performance_view),
        )
        .route("/monthly-trend", get(analytics::monthly_trend_view))
        .route(
            "/difficult-questions",
            get(analytics::difficult_questions_view),
        )
}
