//! Question and answer-option models.
//!
//! A question belongs to exactly one owner, a training or an evaluation
//! (CHECK-enforced in the schema).

use learnbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "question_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
}

/// A question row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub training_id: Option<DbId>,
    pub evaluation_id: Option<DbId>,
    pub text: String,
    pub kind: QuestionKind,
    pub order_index: i32,
    pub created_at: Timestamp,
}

/// An answer option row from the `question_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionOption {
    pub id: DbId,
    pub question_id: DbId,
    pub text: String,
    pub is_correct: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a question together with its options.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(length(min = 1))]
    pub text: String,
    pub kind: QuestionKind,
    #[validate(range(min = 0))]
    pub order_index: i32,
    #[validate(length(min = 1), nested)]
    pub options: Vec<CreateQuestionOption>,
}

/// DTO for one answer option of a new question.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionOption {
    #[validate(length(min = 1))]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A question with its options, as returned by listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
}
