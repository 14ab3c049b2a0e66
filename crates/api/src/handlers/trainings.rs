//! Handlers for the `/trainings` resource: CRUD, the draft → published →
//! archived lifecycle, content items, and questions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnbase_core::error::CoreError;
use learnbase_core::types::DbId;
use learnbase_db::models::assignment::SubjectKind;
use learnbase_db::models::question::{CreateQuestion, QuestionWithOptions};
use learnbase_db::models::training::{
    CreateTraining, CreateTrainingContent, Training, TrainingContent, TrainingStatus,
    UpdateTraining,
};
use learnbase_db::repositories::{QuestionRepo, TrainingRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::TenantContext;
use crate::handlers::write_tenant;
use crate::state::AppState;

/// Query parameters for GET /trainings.
#[derive(Debug, Deserialize)]
pub struct ListTrainings {
    pub status: Option<TrainingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn training_not_found() -> AppError {
    AppError::Core(CoreError::NotFoundOrForbidden {
        entity: "training",
    })
}

async fn find_in_scope(
    state: &AppState,
    tenant: TenantContext,
    id: DbId,
) -> AppResult<Training> {
    TrainingRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(training_not_found)
}

/// POST /api/v1/trainings
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(input): Json<CreateTraining>,
) -> AppResult<(StatusCode, Json<Training>)> {
    input.validate()?;
    let tenant_id = write_tenant(tenant.scope())?;
    let training = TrainingRepo::create(&state.pool, tenant_id, &input).await?;
    Ok((StatusCode::CREATED, Json(training)))
}

/// GET /api/v1/trainings
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<ListTrainings>,
) -> AppResult<Json<Vec<Training>>> {
    let limit = learnbase_core::analytics::clamp_limit(params.limit, 50, 500);
    let offset = params.offset.unwrap_or(0).max(0);
    let trainings =
        TrainingRepo::list(&state.pool, tenant.scope(), params.status, limit, offset).await?;
    Ok(Json(trainings))
}

/// GET /api/v1/trainings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Training>> {
    let training = find_in_scope(&state, tenant, id).await?;
    Ok(Json(training))
}

/// PUT /api/v1/trainings/{id}
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTraining>,
) -> AppResult<Json<Training>> {
    input.validate()?;
    let training = TrainingRepo::update(&state.pool, tenant.scope(), id, &input)
        .await?
        .ok_or_else(training_not_found)?;
    Ok(Json(training))
}

/// POST /api/v1/trainings/{id}/publish
///
/// Publishing a draft goes live; publishing an already-published training
/// is an idempotent no-op. Archived is terminal, so publishing it is an
/// invalid argument, not a transition.
pub async fn publish(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Training>> {
    let training = find_in_scope(&state, tenant, id).await?;
    match training.status {
        TrainingStatus::Published => Ok(Json(training)),
        TrainingStatus::Archived => Err(AppError::Core(CoreError::InvalidArgument(
            "cannot publish an archived training".into(),
        ))),
        TrainingStatus::Draft => {
            let published = TrainingRepo::publish(&state.pool, training.id)
                .await?
                .ok_or_else(training_not_found)?;
            tracing::info!(training_id = published.id, "training published");
            Ok(Json(published))
        }
    }
}

/// POST /api/v1/trainings/{id}/archive
///
/// Soft removal: the row and its assignments stay queryable for analytics.
/// Archiving an already-archived training is an idempotent no-op.
pub async fn archive(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Training>> {
    let training = find_in_scope(&state, tenant, id).await?;
    if training.status == TrainingStatus::Archived {
        return Ok(Json(training));
    }
    let archived = TrainingRepo::archive(&state.pool, training.id)
        .await?
        .ok_or_else(training_not_found)?;
    tracing::info!(training_id = archived.id, "training archived");
    Ok(Json(archived))
}

/// GET /api/v1/trainings/{id}/contents
pub async fn list_contents(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<TrainingContent>>> {
    let training = find_in_scope(&state, tenant, id).await?;
    let contents = TrainingRepo::list_contents(&state.pool, training.id).await?;
    Ok(Json(contents))
}

/// POST /api/v1/trainings/{id}/contents
pub async fn add_content(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTrainingContent>,
) -> AppResult<(StatusCode, Json<TrainingContent>)> {
    input.validate()?;
    let training = find_in_scope(&state, tenant, id).await?;
    let content = TrainingRepo::add_content(&state.pool, training.id, &input).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

/// GET /api/v1/trainings/{id}/questions
pub async fn list_questions(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<QuestionWithOptions>>> {
    let training = find_in_scope(&state, tenant, id).await?;
    let questions =
        QuestionRepo::list_with_options(&state.pool, SubjectKind::Training, training.id).await?;
    Ok(Json(questions))
}

/// POST /api/v1/trainings/{id}/questions
pub async fn add_question(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<(StatusCode, Json<QuestionWithOptions>)> {
    input.validate()?;
    let training = find_in_scope(&state, tenant, id).await?;
    let question =
        QuestionRepo::add(&state.pool, SubjectKind::Training, training.id, &input).await?;
    Ok((StatusCode::CREATED, Json(question)))
}
