//! Aggregated view rows returned by the analytics queries.
//!
//! These are raw per-group figures straight out of SQL. The engine turns
//! them into the ranked/zero-filled shapes the reporting endpoints expose.

use learnbase_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Scalar assigned/completed counts for one scope.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct CompletionCounts {
    pub assigned: i64,
    pub completed: i64,
}

/// Per-department aggregate before ranking. `average_score` is `None` when
/// no member has a scored completion in scope.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentPerfRow {
    pub department_id: DbId,
    pub name: String,
    pub member_count: i64,
    pub assigned_count: i64,
    pub completed_count: i64,
    pub average_score: Option<f64>,
}

/// One month bucket from a `date_trunc('month', ...)` GROUP BY. Months with
/// no rows are absent; the engine zero-fills them against a calendar spine.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct MonthCountRow {
    pub month: Timestamp,
    pub count: i64,
}

/// Answer statistics for one question. Only questions with at least one
/// recorded response appear.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionDifficultyRow {
    pub question_id: DbId,
    pub text: String,
    pub answer_count: i64,
    pub correct_count: i64,
}
