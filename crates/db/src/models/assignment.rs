//! Assignment entity model.
//!
//! One row per (subject, user) pair, created by fan-out. `assigned_at` is
//! set on insert and never reset; `started_at` and `completed_at` are
//! external progress markers written by the completion paths, never by
//! fan-out. `completed_at` is set exactly once, then immutable.

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What an assignment points at. Training and evaluation ids come from
/// independent sequences, so the kind is part of the assignment identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "subject_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Training,
    Evaluation,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Training => "training",
            SubjectKind::Evaluation => "evaluation",
        }
    }
}

/// An assignment row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub subject_kind: SubjectKind,
    pub subject_id: DbId,
    pub user_id: DbId,
    pub tenant_id: DbId,
    pub assigned_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub score: Option<f64>,
}
