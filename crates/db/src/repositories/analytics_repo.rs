//! Read-only aggregation queries over assignments, departments, and
//! recorded question responses.
//!
//! Every query applies the same cross-cutting filter shape — tenant,
//! department, date window — as NULL-tolerant bind parameters, so an
//! unscoped (global) read is an explicit `None` bind rather than a separate
//! query variant. Queries count the stored `completed_at` fact directly but
//! never re-derive the three-way assignment status; that fold lives in one
//! place in Rust.

use learnbase_core::scope::{AnalyticsScope, TenantScope};
use learnbase_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::analytics::{
    CompletionCounts, DepartmentPerfRow, MonthCountRow, QuestionDifficultyRow,
};
use crate::models::assignment::SubjectKind;

fn owner_column(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Training => "training_id",
        SubjectKind::Evaluation => "evaluation_id",
    }
}

/// Provides the aggregation queries behind the analytics endpoints.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Assigned/completed totals for a scope, optionally restricted to one
    /// subject kind. Zero counts on empty scopes.
    pub async fn completion_counts(
        pool: &PgPool,
        kind: Option<SubjectKind>,
        scope: &AnalyticsScope,
    ) -> Result<CompletionCounts, sqlx::Error> {
        sqlx::query_as::<_, CompletionCounts>(
            "SELECT COUNT(*)::BIGINT AS assigned,
                    COUNT(a.completed_at)::BIGINT AS completed
             FROM assignments a
             WHERE ($1::subject_kind IS NULL OR a.subject_kind = $1)
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
        .fetch_one(pool)
        .await
    }

    /// Assigned/completed totals for one subject.
    pub async fn completion_counts_for_subject(
        pool: &PgPool,
        kind: SubjectKind,
        subject_id: DbId,
        tenant: TenantScope,
    ) -> Result<CompletionCounts, sqlx::Error> {
        sqlx::query_as::<_, CompletionCounts>(
            "SELECT COUNT(*)::BIGINT AS assigned,
                    COUNT(a.completed_at)::BIGINT AS completed
             FROM assignments a
             WHERE a.subject_kind = $1 AND a.subject_id = $2
               AND ($3::BIGINT IS NULL OR a.tenant_id = $3)",
        )
        .bind(kind)
        .bind(subject_id)
        .bind(tenant.as_param())
        .fetch_one(pool)
        .await
    }

    /// Non-null scores of completed assignments in scope. Assignments
    /// completed without a score are excluded here, not coerced to zero.
    pub async fn completed_scores(
        pool: &PgPool,
        kind: Option<SubjectKind>,
        scope: &AnalyticsScope,
    ) -> Result<Vec<f64>, sqlx::Error> {
        let rows: Vec<(f64,)> = sqlx::query_as(
            "SELECT a.score FROM assignments a
             WHERE a.completed_at IS NOT NULL AND a.score IS NOT NULL
               AND ($1::subject_kind IS NULL OR a.subject_kind = $1)
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
        .await?;
        Ok(rows.into_iter().map(|(score,)| score).collect())
    }

    /// Non-null scores of one subject's completed assignments.
    pub async fn completed_scores_for_subject(
        pool: &PgPool,
        kind: SubjectKind,
        subject_id: DbId,
        tenant: TenantScope,
    ) -> Result<Vec<f64>, sqlx::Error> {
        let rows: Vec<(f64,)> = sqlx::query_as(
            "SELECT a.score FROM assignments a
             WHERE a.subject_kind = $1 AND a.subject_id = $2
               AND a.completed_at IS NOT NULL AND a.score IS NOT NULL
               AND ($3::BIGINT IS NULL OR a.tenant_id = $3)",
        )
        .bind(kind)
        .bind(subject_id)
        .bind(tenant.as_param())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(score,)| score).collect())
    }

    /// Per-department aggregates. Departments with no members or no
    /// assignments still appear (LEFT JOINs), with zero counts and a NULL
    /// average; ranking and zero-normalization happen in the engine.
    pub async fn department_performance_rows(
        pool: &PgPool,
        scope: &AnalyticsScope,
    ) -> Result<Vec<DepartmentPerfRow>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentPerfRow>(
            "SELECT d.id AS department_id,
                    d.name,
                    COUNT(DISTINCT dm.user_id)::BIGINT AS member_count,
                    COUNT(a.id)::BIGINT AS assigned_count,
                    COUNT(a.completed_at)::BIGINT AS completed_count,
                    AVG(a.score)::FLOAT8 AS average_score
             FROM departments d
             LEFT JOIN department_memberships dm ON dm.department_id = d.id
             LEFT JOIN assignments a
                    ON a.user_id = dm.user_id
                   AND ($1::BIGINT IS NULL OR a.tenant_id = $1)
                   AND ($3::TIMESTAMPTZ IS NULL OR a.assigned_at >= $3)
                   AND ($4::TIMESTAMPTZ IS NULL OR a.assigned_at <= $4)
             WHERE ($1::BIGINT IS NULL OR d.tenant_id = $1)
               AND ($2::BIGINT IS NULL OR d.id = $2)
             GROUP BY d.id, d.name
             ORDER BY d.name, d.id",
        )
        .bind(scope.tenant.as_param())
        .bind(scope.department_id)
        .bind(scope.from)
        .bind(scope.until)
        .fetch_all(pool)
        .await
    }

    /// Assignment counts per month since `since`, bucketed on `assigned_at`.
    /// Quiet months are absent from the result.
    pub async fn monthly_assigned_counts(
        pool: &PgPool,
        scope: &AnalyticsScope,
        since: Timestamp,
    ) -> Result<Vec<MonthCountRow>, sqlx::Error> {
        sqlx::query_as::<_, MonthCountRow>(
            "SELECT date_trunc('month', a.assigned_at) AS month,
                    COUNT(*)::BIGINT AS count
             FROM assignments a
             WHERE a.assigned_at >= $1
               AND ($2::BIGINT IS NULL OR a.tenant_id = $2)
               AND ($3::BIGINT IS NULL OR EXISTS (
                     SELECT 1 FROM department_memberships dm
                     WHERE dm.department_id = $3 AND dm.user_id = a.user_id))
             GROUP BY month
             ORDER BY month",
        )
        .bind(since)
        .bind(scope.tenant.as_param())
        .bind(scope.department_id)
        .fetch_all(pool)
        .await
    }

    /// Completion counts per month since `since`, bucketed on the completion
    /// instant rather than the assignment instant.
    pub async fn monthly_completed_counts(
        pool: &PgPool,
        scope: &AnalyticsScope,
        since: Timestamp,
    ) -> Result<Vec<MonthCountRow>, sqlx::Error> {
        sqlx::query_as::<_, MonthCountRow>(
            "SELECT date_trunc('month', a.completed_at) AS month,
                    COUNT(*)::BIGINT AS count
             FROM assignments a
             WHERE a.completed_at IS NOT NULL AND a.completed_at >= $1
               AND ($2::BIGINT IS NULL OR a.tenant_id = $2)
               AND ($3::BIGINT IS NULL OR EXISTS (
                     SELECT 1 FROM department_memberships dm
                     WHERE dm.department_id = $3 AND dm.user_id = a.user_id))
             GROUP BY month
             ORDER BY month",
        )
        .bind(since)
        .bind(scope.tenant.as_param())
        .bind(scope.department_id)
        .fetch_all(pool)
        .await
    }

    /// Answer statistics for one subject's questions, hardest first.
    /// Questions with no recorded answers are excluded by the inner join.
    pub async fn question_difficulty(
        pool: &PgPool,
        kind: SubjectKind,
        subject_id: DbId,
        limit: i64,
    ) -> Result<Vec<QuestionDifficultyRow>, sqlx::Error> {
        let query = format!(
            "SELECT q.id AS question_id,
                    q.text,
                    COUNT(r.id)::BIGINT AS answer_count,
                    (COUNT(*) FILTER (WHERE r.is_correct))::BIGINT AS correct_count
             FROM questions q
             JOIN question_responses r ON r.question_id = q.id
             WHERE q.{owner} = $1
             GROUP BY q.id, q.text
             ORDER BY (COUNT(*) FILTER (WHERE r.is_correct))::FLOAT8
                      / COUNT(r.id)::FLOAT8 ASC,
                      q.id
             LIMIT $2",
            owner = owner_column(kind),
        );
        sqlx::query_as::<_, QuestionDifficultyRow>(&query)
            .bind(subject_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
