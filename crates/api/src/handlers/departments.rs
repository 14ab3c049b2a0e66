//! Handlers for the `/departments` resource and its memberships.
//!
//! Membership changes affect future fan-outs only: expansion works on a
//! point-in-time snapshot, so removing a member never revokes assignments
//! they already hold.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use learnbase_core::error::CoreError;
use learnbase_core::types::DbId;
use learnbase_db::models::department::{
    CreateDepartment, Department, DepartmentMember, UpdateDepartment,
};
use learnbase_db::repositories::{DepartmentRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::TenantContext;
use crate::handlers::write_tenant;
use crate::state::AppState;

/// Body for POST /{id}/members.
#[derive(Debug, Deserialize)]
pub struct AddMember {
    pub user_id: DbId,
}

fn department_not_found() -> AppError {
    AppError::Core(CoreError::NotFoundOrForbidden {
        entity: "department",
    })
}

/// POST /api/v1/departments
pub async fn create(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    input.validate()?;
    let tenant_id = write_tenant(tenant.scope())?;
    let department = DepartmentRepo::create(&state.pool, tenant_id, &input).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/departments
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool, tenant.scope()).await?;
    Ok(Json(departments))
}

/// GET /api/v1/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(department_not_found)?;
    Ok(Json(department))
}

/// PUT /api/v1/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    input.validate()?;
    let department = DepartmentRepo::update(&state.pool, tenant.scope(), id, &input)
        .await?
        .ok_or_else(department_not_found)?;
    Ok(Json(department))
}

/// DELETE /api/v1/departments/{id}
pub async fn delete(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DepartmentRepo::delete(&state.pool, tenant.scope(), id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(department_not_found())
    }
}

/// GET /api/v1/departments/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<DepartmentMember>>> {
    let department = DepartmentRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(department_not_found)?;
    let members = DepartmentRepo::list_members(&state.pool, department.id).await?;
    Ok(Json(members))
}

/// POST /api/v1/departments/{id}/members
///
/// Both the department and the user must be visible in scope; membership is
/// never created across tenants. Re-adding an existing member is a no-op
/// that still returns 204.
pub async fn add_member(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<DbId>,
    Json(input): Json<AddMember>,
) -> AppResult<StatusCode> {
    let department = DepartmentRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(department_not_found)?;
    let member_scope = learnbase_core::scope::TenantScope::Tenant(department.tenant_id);
    UserRepo::find_by_id(&state.pool, member_scope, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundOrForbidden {
            entity: "user",
        }))?;

    DepartmentRepo::add_member(&state.pool, department.id, input.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/departments/{id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let department = DepartmentRepo::find_by_id(&state.pool, tenant.scope(), id)
        .await?
        .ok_or_else(department_not_found)?;
    let removed = DepartmentRepo::remove_member(&state.pool, department.id, user_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFoundOrForbidden {
            entity: "membership",
        }))
    }
}
