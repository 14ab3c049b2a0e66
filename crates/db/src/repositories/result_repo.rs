//! Repository for the `user_evaluation_results` and `question_responses`
//! tables.

use learnbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::result::{EvaluationResult, QuestionResponse, RecordResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, assignment_id, status, score, started_at, completed_at";

const RESPONSE_COLUMNS: &str = "id, result_id, question_id, option_id, is_correct, answered_at";

/// Provides evaluation result and response recording operations.
pub struct ResultRepo;

impl ResultRepo {
    /// Open a pending result for an assignment, or return the existing one.
    /// Idempotent: a user resuming an evaluation gets the same result row.
    pub async fn open_for_assignment(
        pool: &PgPool,
        assignment_id: DbId,
    ) -> Result<EvaluationResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_evaluation_results (assignment_id)
             VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_user_evaluation_results_assignment
             DO UPDATE SET assignment_id = EXCLUDED.assignment_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EvaluationResult>(&query)
            .bind(assignment_id)
            .fetch_one(pool)
            .await
    }

    /// Find the result row for an assignment, if one was opened.
    pub async fn find_by_assignment(
        pool: &PgPool,
        assignment_id: DbId,
    ) -> Result<Option<EvaluationResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_evaluation_results WHERE assignment_id = $1");
        sqlx::query_as::<_, EvaluationResult>(&query)
            .bind(assignment_id)
            .fetch_optional(pool)
            .await
    }

    /// Complete an assignment and its result row in one transaction.
    ///
    /// The assignment's `completed_at` is the once-only guard: if it is
    /// already set, nothing is written and `false` comes back. A result row
    /// is updated when one was opened; a completion recorded without
    /// responses (e.g. scored externally) is still valid.
    pub async fn complete(
        pool: &PgPool,
        assignment_id: DbId,
        score: f64,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let assignment = sqlx::query(
            "UPDATE assignments SET completed_at = NOW(), score = $2
             WHERE id = $1 AND completed_at IS NULL",
        )
        .bind(assignment_id)
        .bind(score)
        .execute(&mut *tx)
        .await?;
        if assignment.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE user_evaluation_results
             SET status = 'completed', score = $2, completed_at = NOW()
             WHERE assignment_id = $1 AND status = 'pending'",
        )
        .bind(assignment_id)
        .bind(score)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Record one answer. Correctness is resolved against the selected
    /// option; a missing or foreign option counts as incorrect. Re-answering
    /// the same question replaces the previous response.
    pub async fn record_response(
        pool: &PgPool,
        result_id: DbId,
        input: &RecordResponse,
    ) -> Result<QuestionResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO question_responses (result_id, question_id, option_id, is_correct)
             VALUES ($1, $2, $3, COALESCE((
                 SELECT o.is_correct FROM question_options o
                 WHERE o.id = $3 AND o.question_id = $2), FALSE))
             ON CONFLICT ON CONSTRAINT uq_question_responses_result_question
             DO UPDATE SET option_id = EXCLUDED.option_id,
                           is_correct = EXCLUDED.is_correct,
                           answered_at = NOW()
             RETURNING {RESPONSE_COLUMNS}"
        );
        sqlx::query_as::<_, QuestionResponse>(&query)
            .bind(result_id)
            .bind(input.question_id)
            .bind(input.option_id)
            .fetch_one(pool)
            .await
    }

    /// List the responses recorded under a result.
    pub async fn list_responses(
        pool: &PgPool,
        result_id: DbId,
    ) -> Result<Vec<QuestionResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM question_responses
             WHERE result_id = $1
             ORDER BY answered_at, id"
        );
        sqlx::query_as::<_, QuestionResponse>(&query)
            .bind(result_id)
            .fetch_all(pool)
            .await
    }
}
