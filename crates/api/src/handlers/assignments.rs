//! Handlers for the `/assignments` resource: fan-out and per-assignment
//! progress.
//!
//! The POST / fan-out endpoint is the write path of the engine; everything
//! else here reads assignment rows or forwards progress events to the
//! completion path. Progress status in responses always comes from the
//! shared derivation in `learnbase_core::status`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnbase_core::error::CoreError;
use learnbase_core::status::{derive_status, AssignmentStatus};
use learnbase_core::types::DbId;
use learnbase_db::models::assignment::{Assignment, SubjectKind};
use learnbase_db::models::result::{QuestionResponse, RecordResponse};
use learnbase_db::repositories::{AssignmentRepo, ResultRepo};
use learnbase_engine::fanout::{assign_subject_to_targets, AssignmentOutcome, AssignmentRequest};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::TenantContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for GET /assignments.
#[derive(Debug, Deserialize)]
pub struct ListAssignments {
    pub subject_kind: Option<SubjectKind>,
    pub subject_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body for POST /{id}/complete.
#[derive(Debug, Deserialize)]
pub struct CompleteAssignment {
    pub score: Option<f64>,
}

/// An assignment with its derived progress status attached.
#[derive(Debug, Serialize)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub status: AssignmentStatus,
}

impl From<Assignment> for AssignmentView {
    fn from(assignment: Assignment) -> Self {
        let status = derive_status(assignment.completed_at, assignment.started_at);
        Self { assignment, status }
    }
}

fn assignment_not_found() -> AppError {
    AppError::Core(CoreError::NotFoundOrForbidden {
        entity: "assignment",
    })
}

async fn find_in_scope(
    state: &AppState,
    tenant: TenantContext,
    id: DbId,
) -> AppResult<Assignment> {
    AssignmentRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(assignment_not_found)
}

/// POST /api/v1/assignments
///
/// Fan a subject out to a batch of user/department targets. Idempotent: the
/// same request twice produces the same row set, with `newly_assigned = 0`
/// the second time, so callers retry the whole call on any failure.
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(request): Json<AssignmentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AssignmentOutcome>>)> {
    let cancel = state.shutdown.child_token();
    let outcome =
        assign_subject_to_targets(&state.pool, tenant.scope(), &request, &cancel).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /api/v1/assignments
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<ListAssignments>,
) -> AppResult<Json<Vec<AssignmentView>>> {
    let limit = learnbase_core::analytics::clamp_limit(params.limit, 50, 500);
    let offset = params.offset.unwrap_or(0).max(0);
    let assignments = AssignmentRepo::list(
        &state.pool,
        tenant.scope(),
        params.subject_kind,
        params.subject_id,
        params.user_id,
        limit,
        offset,
    )
    .await?;
    Ok(Json(assignments.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/assignments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<AssignmentView>> {
    let assignment = find_in_scope(&state, tenant, id).await?;
    Ok(Json(assignment.into()))
}

/// POST /api/v1/assignments/{id}/start
///
/// Set the explicit progress marker. Starting twice, or after completion,
/// changes nothing; the current state comes back either way. For evaluation
/// assignments this also opens the result row the responses hang off.
pub async fn start(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<AssignmentView>> {
    let assignment = find_in_scope(&state, tenant, id).await?;
    AssignmentRepo::mark_started(&state.pool, assignment.id).await?;
    if assignment.subject_kind == SubjectKind::Evaluation {
        ResultRepo::open_for_assignment(&state.pool, assignment.id).await?;
    }
    let refreshed = find_in_scope(&state, tenant, id).await?;
    Ok(Json(refreshed.into()))
}

/// POST /api/v1/assignments/{id}/complete
///
/// Record completion exactly once. Evaluation assignments require a score
/// and complete their result row in the same transaction; training
/// assignments accept an optional score. A second completion is rejected —
/// `completed_at` is immutable once set.
pub async fn complete(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteAssignment>,
) -> AppResult<Json<AssignmentView>> {
    if let Some(score) = input.score {
        if !(0.0..=100.0).contains(&score) {
            return Err(AppError::Core(CoreError::InvalidArgument(
                "score must be between 0 and 100".into(),
            )));
        }
    }

    let assignment = find_in_scope(&state, tenant, id).await?;
    let completed = match assignment.subject_kind {
        SubjectKind::Evaluation => {
            let score = input.score.ok_or(AppError::Core(CoreError::InvalidArgument(
                "completing an evaluation requires a score".into(),
            )))?;
            ResultRepo::complete(&state.pool, assignment.id, score).await?
        }
        SubjectKind::Training => {
            AssignmentRepo::record_completion(&state.pool, assignment.id, input.score).await?
        }
    };
    if !completed {
        return Err(AppError::Core(CoreError::InvalidArgument(
            "assignment is already completed".into(),
        )));
    }

    let refreshed = find_in_scope(&state, tenant, id).await?;
    tracing::info!(
        assignment_id = refreshed.id,
        subject_kind = refreshed.subject_kind.as_str(),
        "assignment completed"
    );
    Ok(Json(refreshed.into()))
}

/// GET /api/v1/assignments/{id}/responses
pub async fn list_responses(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<QuestionResponse>>> {
    let assignment = find_in_scope(&state, tenant, id).await?;
    let responses = match ResultRepo::find_by_assignment(&state.pool, assignment.id).await? {
        Some(result) => ResultRepo::list_responses(&state.pool, result.id).await?,
        None => Vec::new(),
    };
    Ok(Json(responses))
}

/// POST /api/v1/assignments/{id}/responses
///
/// Record one answer under the assignment's result row, opening it if the
/// caller skipped the explicit start. Re-answering a question replaces the
/// earlier response. Answers are frozen once the assignment completes.
pub async fn record_response(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<RecordResponse>,
) -> AppResult<(StatusCode, Json<QuestionResponse>)> {
    let assignment = find_in_scope(&state, tenant, id).await?;
    if assignment.completed_at.is_some() {
        return Err(AppError::Core(CoreError::InvalidArgument(
            "assignment is already completed".into(),
        )));
    }
    let result = ResultRepo::open_for_assignment(&state.pool, assignment.id).await?;
    let response = ResultRepo::record_response(&state.pool, result.id, &input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
