//! Repository for the `evaluations` table.

use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::evaluation::{CreateEvaluation, Evaluation, EvaluationStatus, UpdateEvaluation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tenant_id, training_id, title, passing_score, time_limit_minutes, \
                       status, created_by, created_at, updated_at";

/// Provides CRUD operations for evaluations.
pub struct EvaluationRepo;

impl EvaluationRepo {
    /// Insert a new evaluation in `draft` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateEvaluation,
    ) -> Result<Evaluation, sqlx::Error> {
        let query = format!(
            "INSERT INTO evaluations
                (tenant_id, training_id, title, passing_score, time_limit_minutes, created_by)
             VALUES ($1, $2, $3, COALESCE($4, 60), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(tenant_id)
            .bind(input.training_id)
            .bind(&input.title)
            .bind(input.passing_score)
            .bind(input.time_limit_minutes)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an evaluation by ID within the given scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
    ) -> Result<Option<Evaluation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluations
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(id)
            .bind(scope.as_param())
            .fetch_optional(pool)
            .await
    }

    /// List evaluations in scope, optionally filtered by status, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: TenantScope,
        status: Option<EvaluationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Evaluation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM evaluations
             WHERE ($1::BIGINT IS NULL OR tenant_id = $1)
               AND ($2::evaluation_status IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(scope.as_param())
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an evaluation. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
        input: &UpdateEvaluation,
    ) -> Result<Option<Evaluation>, sqlx::Error> {
        let query = format!(
            "UPDATE evaluations SET
                title = COALESCE($3, title),
                passing_score = COALESCE($4, passing_score),
                time_limit_minutes = COALESCE($5, time_limit_minutes),
                status = COALESCE($6, status)
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evaluation>(&query)
            .bind(id)
            .bind(scope.as_param())
            .bind(&input.title)
            .bind(input.passing_score)
            .bind(input.time_limit_minutes)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }
}
