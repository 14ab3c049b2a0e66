//! Evaluation result and question response models.
//!
//! A result row is opened when a user starts an evaluation and completed
//! atomically with its assignment. The schema enforces the consistency
//! invariant: status = completed exactly when completed_at and score are set.

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "result_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Pending,
    Completed,
}

/// A row from the `user_evaluation_results` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvaluationResult {
    pub id: DbId,
    pub assignment_id: DbId,
    pub status: ResultStatus,
    pub score: Option<f64>,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// A recorded answer from the `question_responses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionResponse {
    pub id: DbId,
    pub result_id: DbId,
    pub question_id: DbId,
    pub option_id: Option<DbId>,
    pub is_correct: bool,
    pub answered_at: Timestamp,
}

/// DTO for recording one answer. Correctness is resolved against the
/// selected option at insert time.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordResponse {
    pub question_id: DbId,
    pub option_id: Option<DbId>,
}
