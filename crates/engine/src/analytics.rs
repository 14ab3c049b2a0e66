//! Analytics aggregation service.
//!
//! Read-only query family over an [`AnalyticsScope`]. Each operation fetches
//! raw rows through `AnalyticsRepo` and shapes them with the pure helpers in
//! `learnbase_core::analytics`; empty scopes produce zero-valued results,
//! never errors. Storage failures propagate unmodified — reads are
//! idempotent, so retry policy belongs to the caller.

use std::collections::BTreeMap;

use chrono::Utc;
use learnbase_core::analytics::{
    clamp_limit, completion_rate as rate, default_score_buckets, department_performance as rank,
    month_spine, monthly_trend as spine_join, score_distribution as bucketize,
    DepartmentPerfInput, DepartmentPerformance, MonthKey, MonthlyActivity, ScoreBucket,
};
use learnbase_core::scope::{AnalyticsScope, TenantScope};
use learnbase_core::status::StatusCounts;
use learnbase_core::types::DbId;
use learnbase_db::models::analytics::MonthCountRow;
use learnbase_db::models::assignment::SubjectKind;
use learnbase_db::repositories::{AnalyticsRepo, AssignmentRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::subject::resolve_subject_tenant;
use crate::EngineError;

/// Most months a single trend query may span.
const MAX_TREND_MONTHS: u32 = 120;

/// Default and ceiling for the difficult-question listing.
const DEFAULT_DIFFICULT_LIMIT: i64 = 10;
const MAX_DIFFICULT_LIMIT: i64 = 50;

/// Completion figures for a scope or subject. `completion_rate` is a whole
/// percentage in 0..=100, exactly 0 for an empty population.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompletionRateView {
    pub assigned: i64,
    pub completed: i64,
    pub completion_rate: i64,
}

/// One score band with its count, aligned to the requested bucket order.
#[derive(Debug, Clone, Serialize)]
pub struct BucketCount {
    pub label: String,
    pub low: f64,
    pub high: f64,
    pub count: i64,
}

/// One question ranked by difficulty. `correct_rate` is a percentage;
/// the listing never contains questions without recorded answers.
#[derive(Debug, Clone, Serialize)]
pub struct DifficultQuestion {
    pub question_id: DbId,
    pub text: String,
    pub answer_count: i64,
    pub correct_count: i64,
    pub correct_rate: f64,
}

fn audit_unscoped(op: &'static str, tenant: TenantScope) {
    if tenant.is_unscoped() {
        tracing::debug!(op, "unscoped analytics read");
    }
}

fn validated_buckets(buckets: Option<Vec<ScoreBucket>>) -> Result<Vec<ScoreBucket>, EngineError> {
    let buckets = match buckets {
        Some(buckets) => buckets,
        None => return Ok(default_score_buckets()),
    };
    if buckets.is_empty() {
        return Err(EngineError::invalid_argument("bucket list is empty"));
    }
    if let Some(bad) = buckets.iter().find(|b| b.low > b.high) {
        return Err(EngineError::invalid_argument(format!(
            "bucket low bound {} exceeds high bound {}",
            bad.low, bad.high
        )));
    }
    Ok(buckets)
}

fn month_buckets(rows: Vec<MonthCountRow>) -> BTreeMap<MonthKey, i64> {
    rows.into_iter()
        .map(|row| (MonthKey::of(row.month), row.count))
        .collect()
}

/// Per-status assignment counts for a subject kind in scope.
///
/// Every row maps to exactly one status through the shared derivation; the
/// marker rows are folded here rather than classified in SQL.
pub async fn count_by_status(
    pool: &PgPool,
    kind: SubjectKind,
    scope: &AnalyticsScope,
) -> Result<StatusCounts, EngineError> {
    audit_unscoped("count_by_status", scope.tenant);
    let markers = AssignmentRepo::status_marker_rows(pool, kind, scope).await?;
    Ok(StatusCounts::tally(markers))
}

/// Completion rate over a scope, optionally restricted to one subject kind.
pub async fn completion_rate(
    pool: &PgPool,
    kind: Option<SubjectKind>,
    scope: &AnalyticsScope,
) -> Result<CompletionRateView, EngineError> {
    audit_unscoped("completion_rate", scope.tenant);
    let counts = AnalyticsRepo::completion_counts(pool, kind, scope).await?;
    Ok(CompletionRateView {
        assigned: counts.assigned,
        completed: counts.completed,
        completion_rate: rate(counts.completed, counts.assigned),
    })
}

/// Completion rate for one subject. The subject must be visible in scope.
pub async fn completion_rate_for_subject(
    pool: &PgPool,
    tenant: TenantScope,
    kind: SubjectKind,
    subject_id: DbId,
) -> Result<CompletionRateView, EngineError> {
    audit_unscoped("completion_rate_for_subject", tenant);
    resolve_subject_tenant(pool, tenant, kind, subject_id).await?;
    let counts =
        AnalyticsRepo::completion_counts_for_subject(pool, kind, subject_id, tenant).await?;
    Ok(CompletionRateView {
        assigned: counts.assigned,
        completed: counts.completed,
        completion_rate: rate(counts.completed, counts.assigned),
    })
}

/// Score distribution over a scope. Defaults to five equal bands over
/// [0,100]; completed-without-score assignments are excluded upstream.
pub async fn score_distribution(
    pool: &PgPool,
    kind: Option<SubjectKind>,
    scope: &AnalyticsScope,
    buckets: Option<Vec<ScoreBucket>>,
) -> Result<Vec<BucketCount>, EngineError> {
    audit_unscoped("score_distribution", scope.tenant);
    let buckets = validated_buckets(buckets)?;
    let scores = AnalyticsRepo::completed_scores(pool, kind, scope).await?;
    Ok(aligned_counts(&scores, buckets))
}

/// Score distribution for one subject. The subject must be visible in scope.
pub async fn score_distribution_for_subject(
    pool: &PgPool,
    tenant: TenantScope,
    kind: SubjectKind,
    subject_id: DbId,
    buckets: Option<Vec<ScoreBucket>>,
) -> Result<Vec<BucketCount>, EngineError> {
    audit_unscoped("score_distribution_for_subject", tenant);
    let buckets = validated_buckets(buckets)?;
    resolve_subject_tenant(pool, tenant, kind, subject_id).await?;
    let scores =
        AnalyticsRepo::completed_scores_for_subject(pool, kind, subject_id, tenant).await?;
    Ok(aligned_counts(&scores, buckets))
}

fn aligned_counts(scores: &[f64], buckets: Vec<ScoreBucket>) -> Vec<BucketCount> {
    let counts = bucketize(scores, &buckets);
    buckets
        .into_iter()
        .zip(counts)
        .map(|(bucket, count)| BucketCount {
            label: bucket.label(),
            low: bucket.low,
            high: bucket.high,
            count,
        })
        .collect()
}

/// Ranked per-department performance. Departments without completions rank
/// with an average of 0 and stay in the listing.
pub async fn department_performance(
    pool: &PgPool,
    scope: &AnalyticsScope,
) -> Result<Vec<DepartmentPerformance>, EngineError> {
    audit_unscoped("department_performance", scope.tenant);
    let rows = AnalyticsRepo::department_performance_rows(pool, scope).await?;
    let inputs = rows
        .into_iter()
        .map(|row| DepartmentPerfInput {
            department_id: row.department_id,
            name: row.name,
            member_count: row.member_count,
            assigned_count: row.assigned_count,
            completed_count: row.completed_count,
            average_score: row.average_score,
        })
        .collect();
    Ok(rank(inputs))
}

/// Assignment activity for the last `month_count` calendar months including
/// the current one, oldest first, gap-free.
///
/// The month window is the date filter here; the scope's own `from`/`until`
/// fields are not applied. Assigned counts bucket by `assigned_at`,
/// completed counts by `completed_at`.
pub async fn monthly_trend(
    pool: &PgPool,
    scope: &AnalyticsScope,
    month_count: u32,
) -> Result<Vec<MonthlyActivity>, EngineError> {
    audit_unscoped("monthly_trend", scope.tenant);
    if month_count > MAX_TREND_MONTHS {
        return Err(EngineError::invalid_argument(format!(
            "month_count must be at most {MAX_TREND_MONTHS}"
        )));
    }

    let spine = month_spine(Utc::now(), month_count);
    let Some(since) = spine.first().copied().and_then(MonthKey::start) else {
        return Ok(Vec::new());
    };

    let assigned = month_buckets(AnalyticsRepo::monthly_assigned_counts(pool, scope, since).await?);
    let completed =
        month_buckets(AnalyticsRepo::monthly_completed_counts(pool, scope, since).await?);
    Ok(spine_join(&spine, &assigned, &completed))
}

/// A subject's hardest questions, ascending by correct rate. Questions with
/// no recorded answers have undefined difficulty and are excluded.
pub async fn difficult_questions(
    pool: &PgPool,
    tenant: TenantScope,
    kind: SubjectKind,
    subject_id: DbId,
    limit: Option<i64>,
) -> Result<Vec<DifficultQuestion>, EngineError> {
    audit_unscoped("difficult_questions", tenant);
    resolve_subject_tenant(pool, tenant, kind, subject_id).await?;
    let limit = clamp_limit(limit, DEFAULT_DIFFICULT_LIMIT, MAX_DIFFICULT_LIMIT);
    let rows = AnalyticsRepo::question_difficulty(pool, kind, subject_id, limit).await?;
    Ok(rows
        .into_iter()
        .map(|row| DifficultQuestion {
            question_id: row.question_id,
            text: row.text,
            answer_count: row.answer_count,
            correct_count: row.correct_count,
            correct_rate: 100.0 * row.correct_count as f64 / row.answer_count as f64,
        })
        .collect())
}
