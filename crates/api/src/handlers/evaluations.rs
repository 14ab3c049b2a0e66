//! Handlers for the `/evaluations` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnbase_core::error::CoreError;
use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;
use learnbase_db::models::assignment::SubjectKind;
use learnbase_db::models::evaluation::{
    CreateEvaluation, Evaluation, EvaluationStatus, UpdateEvaluation,
};
use learnbase_db::models::question::{CreateQuestion, QuestionWithOptions};
use learnbase_db::repositories::{EvaluationRepo, QuestionRepo, TrainingRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::TenantContext;
use crate::handlers::write_tenant;
use crate::state::AppState;

/// Query parameters for GET /evaluations.
#[derive(Debug, Deserialize)]
pub struct ListEvaluations {
    pub status: Option<EvaluationStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn evaluation_not_found() -> AppError {
    AppError::Core(CoreError::NotFoundOrForbidden {
        entity: "evaluation",
    })
}

async fn find_in_scope(
    state: &AppState,
    tenant: TenantContext,
    id: DbId,
) -> AppResult<Evaluation> {
    EvaluationRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(evaluation_not_found)
}

/// POST /api/v1/evaluations
///
/// An associated training, if given, must belong to the same tenant.
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(input): Json<CreateEvaluation>,
) -> AppResult<(StatusCode, Json<Evaluation>)> {
    input.validate()?;
    let tenant_id = write_tenant(tenant.scope())?;

    if let Some(training_id) = input.training_id {
        TrainingRepo::find_by_id(&state.pool, TenantScope::Tenant(tenant_id), training_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFoundOrForbidden {
                entity: "training",
            }))?;
    }

    let evaluation = EvaluationRepo::create(&state.pool, tenant_id, &input).await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

/// GET /api/v1/evaluations
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<ListEvaluations>,
) -> AppResult<Json<Vec<Evaluation>>> {
    let limit = learnbase_core::analytics::clamp_limit(params.limit, 50, 500);
    let offset = params.offset.unwrap_or(0).max(0);
    let evaluations =
        EvaluationRepo::list(&state.pool, tenant.scope(), params.status, limit, offset).await?;
    Ok(Json(evaluations))
}

/// GET /api/v1/evaluations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Evaluation>> {
    let evaluation = find_in_scope(&state, tenant, id).await?;
    Ok(Json(evaluation))
}

/// PUT /api/v1/evaluations/{id}
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvaluation>,
) -> AppResult<Json<Evaluation>> {
    input.validate()?;
    let evaluation = EvaluationRepo::update(&state.pool, tenant.scope(), id, &input)
        .await?
        .ok_or_else(evaluation_not_found)?;
    Ok(Json(evaluation))
}

/// GET /api/v1/evaluations/{id}/questions
pub async fn list_questions(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<QuestionWithOptions>>> {
    let evaluation = find_in_scope(&state, tenant, id).await?;
    let questions =
        QuestionRepo::list_with_options(&state.pool, SubjectKind::Evaluation, evaluation.id)
            .await?;
    Ok(Json(questions))
}

/// POST /api/v1/evaluations/{id}/questions
pub async fn add_question(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<(StatusCode, Json<QuestionWithOptions>)> {
    input.validate()?;
    let evaluation = find_in_scope(&state, tenant, id).await?;
    let question =
        QuestionRepo::add(&state.pool, SubjectKind::Evaluation, evaluation.id, &input).await?;
    Ok((StatusCode::CREATED, Json(question)))
}
