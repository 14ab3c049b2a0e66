//! Route definitions for the `/departments` resource and its memberships.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> create
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// GET    /{id}/members             -> list_members
/// POST   /{id}/members             -> add_member
/// DELETE /{id}/members/{user_id}   -> remove_member
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(departments::list).post(departments::create))
        .route(
            "/{id}",
            get(departments::get_by_id)
                .put(departments::update)
                .delete(departments::delete),
        )
        .route(
            "/{id}/members",
            get(departments::list_members).post(departments::add_member),
        )
        .route("/{id}/members/{user_id}", delete(departments::remove_member))
}
