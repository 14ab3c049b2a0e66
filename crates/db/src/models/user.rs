//! User entity model and DTOs.
//!
//! Users are the minimal identity surface this service needs: fan-out
//! targets, assignment owners, and department members. Authentication and
//! profile management live upstream.

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub tenant_id: DbId,
    pub display_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The tenant comes from the request scope.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 200))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
}

/// DTO for updating a user. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 200))]
    pub display_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}
