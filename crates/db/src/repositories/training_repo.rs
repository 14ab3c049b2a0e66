//! Repository for the `trainings` and `training_contents` tables.

use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::training::{
    CreateTraining, CreateTrainingContent, Training, TrainingContent, TrainingStatus,
    UpdateTraining,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tenant_id, title, description, objectives, duration_minutes, \
                       difficulty, status, created_by, created_at, updated_at";

const CONTENT_COLUMNS: &str = "id, training_id, title, kind, body, url, order_index, created_at";

/// Provides CRUD and lifecycle operations for trainings.
pub struct TrainingRepo;

impl TrainingRepo {
    /// Insert a new training in `draft` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        input: &CreateTraining,
    ) -> Result<Training, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainings
                (tenant_id, title, description, objectives, duration_minutes, difficulty, created_by)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 'beginner'), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(tenant_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.objectives)
            .bind(input.duration_minutes)
            .bind(input.difficulty)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a training by ID within the given scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
    ) -> Result<Option<Training>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainings
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .bind(scope.as_param())
            .fetch_optional(pool)
            .await
    }

    /// List trainings in scope, optionally filtered by status, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: TenantScope,
        status: Option<TrainingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Training>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainings
             WHERE ($1::BIGINT IS NULL OR tenant_id = $1)
               AND ($2::training_status IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(scope.as_param())
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a training's descriptive fields. Only non-`None` fields in
    /// `input` are applied. Status changes go through publish/archive.
    pub async fn update(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
        input: &UpdateTraining,
    ) -> Result<Option<Training>, sqlx::Error> {
        let query = format!(
            "UPDATE trainings SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                objectives = COALESCE($5, objectives),
                duration_minutes = COALESCE($6, duration_minutes),
                difficulty = COALESCE($7, difficulty)
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .bind(scope.as_param())
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.objectives)
            .bind(input.duration_minutes)
            .bind(input.difficulty)
            .fetch_optional(pool)
            .await
    }

    /// Transition draft → published. Returns the updated row, or `None` when
    /// the training is not currently a draft (callers decide whether that is
    /// a no-op or an error from the status they already fetched).
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Training>, sqlx::Error> {
        let query = format!(
            "UPDATE trainings SET status = 'published'
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Transition to the terminal `archived` status. Returns the updated
    /// row, or `None` when the training was already archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<Option<Training>, sqlx::Error> {
        let query = format!(
            "UPDATE trainings SET status = 'archived'
             WHERE id = $1 AND status <> 'archived'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Training>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a content item to a training.
    pub async fn add_content(
        pool: &PgPool,
        training_id: DbId,
        input: &CreateTrainingContent,
    ) -> Result<TrainingContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_contents (training_id, title, kind, body, url, order_index)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, TrainingContent>(&query)
            .bind(training_id)
            .bind(&input.title)
            .bind(input.kind)
            .bind(&input.body)
            .bind(&input.url)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// List a training's content items in sequence order.
    pub async fn list_contents(
        pool: &PgPool,
        training_id: DbId,
    ) -> Result<Vec<TrainingContent>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM training_contents
             WHERE training_id = $1
             ORDER BY order_index"
        );
        sqlx::query_as::<_, TrainingContent>(&query)
            .bind(training_id)
            .fetch_all(pool)
            .await
    }
}
