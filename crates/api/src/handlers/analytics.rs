//! Handlers for the read-only `/analytics` query family.
//!
//! Thin parameter-parsing wrappers over `learnbase_engine::analytics`. The
//! tenant dimension always comes from the `x-tenant-id` header; department
//! and date-window filters ride the query string. Empty scopes produce
//! zero-valued payloads, never errors — dashboards render these directly.
//!
//! Scope fields are spelled out per param struct instead of `#[serde(flatten)]`,
//! which `Query`'s urlencoded deserializer cannot combine with numeric fields.

use axum::extract::{Query, State};
use axum::Json;
use learnbase_core::analytics::{DepartmentPerformance, MonthlyActivity};
use learnbase_core::error::CoreError;
use learnbase_core::scope::AnalyticsScope;
use learnbase_core::status::StatusCounts;
use learnbase_core::types::{DbId, Timestamp};
use learnbase_db::models::assignment::SubjectKind;
use learnbase_engine::analytics::{
    completion_rate, completion_rate_for_subject, count_by_status, department_performance,
    difficult_questions, monthly_trend, score_distribution, score_distribution_for_subject,
    BucketCount, CompletionRateView, DifficultQuestion,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::TenantContext;
use crate::query::ScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default month window for the trend endpoint.
const DEFAULT_TREND_MONTHS: u32 = 6;

/// Query parameters for GET /analytics/status-counts.
#[derive(Debug, Deserialize)]
pub struct StatusCountsParams {
    pub subject_kind: SubjectKind,
    pub department_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

/// Query parameters for the rate and distribution endpoints, which accept
/// either a scope or a single subject.
#[derive(Debug, Deserialize)]
pub struct SubjectOrScopeParams {
    pub subject_kind: Option<SubjectKind>,
    pub subject_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

impl SubjectOrScopeParams {
    /// A subject-targeted query must name the subject kind and takes no
    /// additional scope filters (the subject already pins the population).
    fn subject(&self) -> AppResult<Option<(SubjectKind, DbId)>> {
        let Some(subject_id) = self.subject_id else {
            return Ok(None);
        };
        let kind = self.subject_kind.ok_or(AppError::Core(
            CoreError::InvalidArgument("subject_id requires subject_kind".into()),
        ))?;
        if self.department_id.is_some() || self.from.is_some() || self.until.is_some() {
            return Err(AppError::Core(CoreError::InvalidArgument(
                "scope filters do not combine with subject_id".into(),
            )));
        }
        Ok(Some((kind, subject_id)))
    }
}

/// Query parameters for GET /analytics/monthly-trend.
#[derive(Debug, Deserialize)]
pub struct TrendParams {
    pub months: Option<u32>,
    pub department_id: Option<DbId>,
}

/// Query parameters for GET /analytics/difficult-questions.
#[derive(Debug, Deserialize)]
pub struct DifficultQuestionsParams {
    pub subject_kind: SubjectKind,
    pub subject_id: DbId,
    pub limit: Option<i64>,
}

fn scope_of(
    tenant: TenantContext,
    department_id: Option<DbId>,
    from: Option<Timestamp>,
    until: Option<Timestamp>,
) -> AppResult<AnalyticsScope> {
    ScopeParams {
        department_id,
        from,
        until,
    }
    .into_scope(tenant.scope())
}

/// GET /api/v1/analytics/status-counts
pub async fn status_counts(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<StatusCountsParams>,
) -> AppResult<Json<DataResponse<StatusCounts>>> {
    let scope = scope_of(tenant, params.department_id, params.from, params.until)?;
    let counts = count_by_status(&state.pool, params.subject_kind, &scope).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// GET /api/v1/analytics/completion-rate
pub async fn completion_rate_view(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<SubjectOrScopeParams>,
) -> AppResult<Json<DataResponse<CompletionRateView>>> {
    let view = match params.subject()? {
        Some((kind, subject_id)) => {
            completion_rate_for_subject(&state.pool, tenant.scope(), kind, subject_id).await?
        }
        None => {
            let scope = scope_of(tenant, params.department_id, params.from, params.until)?;
            completion_rate(&state.pool, params.subject_kind, &scope).await?
        }
    };
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/analytics/score-distribution
///
/// Always the default five equal bands over [0,100]; custom bucketing is a
/// library-level option the HTTP surface does not expose.
pub async fn score_distribution_view(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<SubjectOrScopeParams>,
) -> AppResult<Json<DataResponse<Vec<BucketCount>>>> {
    let buckets = match params.subject()? {
        Some((kind, subject_id)) => {
            score_distribution_for_subject(&state.pool, tenant.scope(), kind, subject_id, None)
                .await?
        }
        None => {
            let scope = scope_of(tenant, params.department_id, params.from, params.until)?;
            score_distribution(&state.pool, params.subject_kind, &scope, None).await?
        }
    };
    Ok(Json(DataResponse { data: buckets }))
}

/// GET /api/v1/analytics/department-performance
pub async fn department_performance_view(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<DataResponse<Vec<DepartmentPerformance>>>> {
    let scope = params.into_scope(tenant.scope())?;
    let ranked = department_performance(&state.pool, &scope).await?;
    Ok(Json(DataResponse { data: ranked }))
}

/// GET /api/v1/analytics/monthly-trend
///
/// The month window is the only date filter here; `from`/`until` do not
/// apply (the spine itself bounds the range).
pub async fn monthly_trend_view(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<TrendParams>,
) -> AppResult<Json<DataResponse<Vec<MonthlyActivity>>>> {
    let months = params.months.unwrap_or(DEFAULT_TREND_MONTHS);
    let scope = scope_of(tenant, params.department_id, None, None)?;
    let trend = monthly_trend(&state.pool, &scope, months).await?;
    Ok(Json(DataResponse { data: trend }))
}

/// GET /api/v1/analytics/difficult-questions
pub async fn difficult_questions_view(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<DifficultQuestionsParams>,
) -> AppResult<Json<DataResponse<Vec<DifficultQuestion>>>> {
    let questions = difficult_questions(
        &state.pool,
        tenant.scope(),
        params.subject_kind,
        params.subject_id,
        params.limit,
    )
    .await?;
    Ok(Json(DataResponse { data: questions }))
}
