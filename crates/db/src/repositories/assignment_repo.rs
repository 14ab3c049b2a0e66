//! Repository for the `assignments` table.
//!
//! The fan-out write path is a single conflict-ignoring bulk insert against
//! `uq_assignments_subject_user`, so repeated or concurrent fan-outs of the
//! same subject converge on one row per user without touching progress
//! fields on rows that already exist.

use learnbase_core::scope::{AnalyticsScope, TenantScope};
use learnbase_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::assignment::{Assignment, SubjectKind};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject_kind, subject_id, user_id, tenant_id, assigned_at, \
                       started_at, completed_at, score";

/// Provides fan-out inserts and progress updates for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert one assignment row per user in a single atomic statement.
    ///
    /// Existing (subject, user) rows are left untouched, including their
    /// `assigned_at`, `completed_at`, and `score`. Returns the number of rows
    /// actually inserted; the difference from `user_ids.len()` is the
    /// already-assigned count.
    pub async fn bulk_assign(
        pool: &PgPool,
        kind: SubjectKind,
        subject_id: DbId,
        tenant_id: DbId,
        user_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO assignments (subject_kind, subject_id, user_id, tenant_id)
             SELECT $1, $2, ids.user_id, $3
             FROM unnest($4::BIGINT[]) AS ids (user_id)
             ON CONFLICT ON CONSTRAINT uq_assignments_subject_user DO NOTHING",
        )
        .bind(kind)
        .bind(subject_id)
        .bind(tenant_id)
        .bind(user_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Find an assignment by ID within the given scope.
    pub async fn find_by_id(
        pool: &PgPool,
        scope: TenantScope,
        id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE id = $1 AND ($2::BIGINT IS NULL OR tenant_id = $2)"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(scope.as_param())
            .fetch_optional(pool)
            .await
    }

    /// List assignments in scope with optional subject/user filters, newest
    /// first.
    pub async fn list(
        pool: &PgPool,
        scope: TenantScope,
        kind: Option<SubjectKind>,
        subject_id: Option<DbId>,
        user_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE ($1::BIGINT IS NULL OR tenant_id = $1)
               AND ($2::subject_kind IS NULL OR subject_kind = $2)
               AND ($3::BIGINT IS NULL OR subject_id = $3)
               AND ($4::BIGINT IS NULL OR user_id = $4)
             ORDER BY assigned_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(scope.as_param())
            .bind(kind)
            .bind(subject_id)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set the progress marker. Only transitions an untouched row; calling
    /// again (or after completion) affects nothing and returns `false`.
    pub async fn mark_started(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assignments SET started_at = NOW()
             WHERE id = $1 AND started_at IS NULL AND completed_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record completion with an optional score. `completed_at` is set
    /// exactly once: a second call matches no row and returns `false`.
    pub async fn record_completion(
        pool: &PgPool,
        id: DbId,
        score: Option<f64>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assignments SET completed_at = NOW(), score = $2
             WHERE id = $1 AND completed_at IS NULL",
        )
        .bind(id)
        .bind(score)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the (completed_at, started_at) marker pairs for every
    /// assignment in scope. Status classification happens in one place in
    /// Rust, not in SQL, so callers fold these markers themselves.
    pub async fn status_marker_rows(
        pool: &PgPool,
        kind: SubjectKind,
        scope: &AnalyticsScope,
    ) -> Result<Vec<(Option<Timestamp>, Option<Timestamp>)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT a.completed_at, a.started_at FROM assignments a
             WHERE a.subject_kind = $1
               AND ($2::BIGINT IS NULL OR a.tenant_id = $2)
               AND ($3::BIGINT IS NULL OR EXISTS (
                     SELECT 1 FROM department_memberships dm
                     WHERE dm.department_id = $3 AND dm.user_id = a.user_id))
               AND ($4::TIMESTAMPTZ IS NULL OR a.assigned_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR a.assigned_at <= $5)",
        )
        .bind(kind)
        .bind(scope.tenant.as_param())
        .bind(scope.department_id)
        .bind(scope.from)
        .bind(scope.until)
        .fetch_all(pool)
        .await
    }
}
