//! Evaluation entity model and DTOs.

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "evaluation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Active,
    Completed,
    Expired,
}

/// An evaluation row from the `evaluations` table.
///
/// `training_id` is an optional association: an evaluation may test a
/// specific training or stand alone.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Evaluation {
    pub id: DbId,
    pub tenant_id: DbId,
    pub training_id: Option<DbId>,
    pub title: String,
    pub passing_score: f64,
    pub time_limit_minutes: Option<i32>,
    pub status: EvaluationStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new evaluation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvaluation {
    pub training_id: Option<DbId>,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    /// Defaults to 60 if omitted.
    #[validate(range(min = 0.0, max = 100.0))]
    pub passing_score: Option<f64>,
    #[validate(range(min = 1))]
    pub time_limit_minutes: Option<i32>,
    pub created_by: DbId,
}

/// DTO for updating an evaluation. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEvaluation {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub passing_score: Option<f64>,
    #[validate(range(min = 1))]
    pub time_limit_minutes: Option<i32>,
    pub status: Option<EvaluationStatus>,
}
