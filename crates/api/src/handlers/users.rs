//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use learnbase_core::error::CoreError;
use learnbase_core::types::DbId;
use learnbase_db::models::user::{CreateUser, UpdateUser, User};
use learnbase_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::TenantContext;
use crate::handlers::write_tenant;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;
    let tenant_id = write_tenant(tenant.scope())?;
    let user = UserRepo::create(&state.pool, tenant_id, &input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(
        &state.pool,
        tenant.scope(),
        params.limit_or(50, 500),
        params.offset_or_zero(),
    )
    .await?;
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundOrForbidden {
            entity: "user",
        }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    input.validate()?;
    let user = UserRepo::update(&state.pool, tenant.scope(), id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundOrForbidden {
            entity: "user",
        }))?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, tenant.scope(), id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFoundOrForbidden {
            entity: "user",
        }))
    }
}
