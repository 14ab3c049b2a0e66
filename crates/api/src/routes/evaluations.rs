//! Route definitions for the `/evaluations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::evaluations;
use crate::state::AppState;

/// Routes mounted at `/evaluations`.
///
/// ```text
/// GET   /                  -> list (?status=&limit=&offset=)
/// POST  /                  -> create
/// GET   /{id}              -> get_by_id
/// PUT   /{id}              -> update
/// GET   /{id}/questions    -> list_questions
/// POST  /{id}/questions    -> add_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(evaluations::list).post(evaluations::create))
        .route("/{id}", get(evaluations::get_by_id).put(evaluations::update))
        .route(
            "/{id}/questions",
            get(evaluations::list_questions).post(evaluations::add_question),
        )
}
