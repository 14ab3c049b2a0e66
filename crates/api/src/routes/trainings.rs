//! Route definitions for the `/trainings` resource: CRUD, lifecycle
//! transitions, content items, and questions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trainings;
use crate::state::AppState;

/// Routes mounted at `/trainings`.
///
/// ```text
/// GET   /                  -> list (?status=&limit=&offset=)
/// POST  /                  -> create
/// GET   /{id}              -> get_by_id
/// PUT   /{id}              -> update
/// POST  /{id}/publish      -> publish (draft only; published is a no-op)
/// POST  /{id}/archive      -> archive (terminal)
/// GET   /{id}/contents     -> list_contents
/// POST  /{id}/contents     -> add_content
/// GET   /{id}/questions    -> list_questions
/// POST  /{id}/questions    -> add_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trainings::list).post(trainings::create))
        .route("/{id}", get(trainings::get_by_id).put(trainings::update))
        .route("/{id}/publish", post(trainings::publish))
        .route("/{id}/archive", post(trainings::archive))
        .route(
            "/{id}/contents",
            get(trainings::list_contents).post(trainings::add_content),
        )
        .route(
            "/{id}/questions",
            get(trainings::list_questions).post(trainings::add_question),
        )
}
