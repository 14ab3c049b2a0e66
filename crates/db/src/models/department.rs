//! Department entity model and DTOs.

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A department row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new department.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// DTO for renaming a department.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

/// A member listing row: the user joined with their membership timestamp.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentMember {
    pub user_id: DbId,
    pub display_name: String,
    pub email: String,
    pub added_at: Timestamp,
}
