//! Repository for the `questions` and `question_options` tables.

use learnbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::assignment::SubjectKind;
use crate::models::question::{CreateQuestion, Question, QuestionOption, QuestionWithOptions};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, training_id, evaluation_id, text, kind, order_index, created_at";

const OPTION_COLUMNS: &str = "id, question_id, text, is_correct, created_at";

fn owner_column(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Training => "training_id",
        SubjectKind::Evaluation => "evaluation_id",
    }
}

/// Provides question and answer-option operations.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question and its options under the given owner in one
    /// transaction, returning the question with options attached.
    pub async fn add(
        pool: &PgPool,
        kind: SubjectKind,
        owner_id: DbId,
        input: &CreateQuestion,
    ) -> Result<QuestionWithOptions, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let question_query = format!(
            "INSERT INTO questions ({owner}, text, kind, order_index)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}",
            owner = owner_column(kind),
        );
        let question = sqlx::query_as::<_, Question>(&question_query)
            .bind(owner_id)
            .bind(&input.text)
            .bind(input.kind)
            .bind(input.order_index)
            .fetch_one(&mut *tx)
            .await?;

        let option_query = format!(
            "INSERT INTO question_options (question_id, text, is_correct)
             VALUES ($1, $2, $3)
             RETURNING {OPTION_COLUMNS}"
        );
        let mut options = Vec::with_capacity(input.options.len());
        for option in &input.options {
            let row = sqlx::query_as::<_, QuestionOption>(&option_query)
                .bind(question.id)
                .bind(&option.text)
                .bind(option.is_correct)
                .fetch_one(&mut *tx)
                .await?;
            options.push(row);
        }

        tx.commit().await?;
        Ok(QuestionWithOptions { question, options })
    }

    /// List a subject's questions in sequence order.
    pub async fn list_for_subject(
        pool: &PgPool,
        kind: SubjectKind,
        owner_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE {owner} = $1
             ORDER BY order_index",
            owner = owner_column(kind),
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List the options of one question in insertion order.
    pub async fn list_options(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<QuestionOption>, sqlx::Error> {
        let query = format!(
            "SELECT {OPTION_COLUMNS} FROM question_options
             WHERE question_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, QuestionOption>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// List a subject's questions with their options attached. The options
    /// come back in one query and are grouped in memory.
    pub async fn list_with_options(
        pool: &PgPool,
        kind: SubjectKind,
        owner_id: DbId,
    ) -> Result<Vec<QuestionWithOptions>, sqlx::Error> {
        let questions = Self::list_for_subject(pool, kind, owner_id).await?;

        let option_query = format!(
            "SELECT {OPTION_COLUMNS} FROM question_options
             WHERE question_id = ANY($1)
             ORDER BY id"
        );
        let question_ids: Vec<DbId> = questions.iter().map(|q| q.id).collect();
        let all_options = sqlx::query_as::<_, QuestionOption>(&option_query)
            .bind(&question_ids)
            .fetch_all(pool)
            .await?;

        Ok(questions
            .into_iter()
            .map(|question| {
                let options = all_options
                    .iter()
                    .filter(|o| o.question_id == question.id)
                    .cloned()
                    .collect();
                QuestionWithOptions { question, options }
            })
            .collect())
    }
}
