//! Route definitions for the `/assignments` resource: fan-out and
//! per-assignment progress.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// GET   /                  -> list (?subject_kind=&subject_id=&user_id=)
/// POST  /                  -> create (fan-out)
/// GET   /{id}              -> get_by_id
/// POST  /{id}/start        -> start (set progress marker)
/// POST  /{id}/complete     -> complete (once-only)
/// GET   /{id}/responses    -> list_responses
/// POST  /{id}/responses    -> record_response
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assignments::list).post(assignments::create))
        .route("/{id}", get(assignments::get_by_id))
        .route("/{id}/start", post(assignments::start))
        .route("/{id}/complete", post(assignments::complete))
        .route(
            "/{id}/responses",
            get(assignments::list_responses).post(assignments::record_response),
        )
}
