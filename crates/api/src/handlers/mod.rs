//! Request handlers, one module per resource.
//!
//! Handlers parse/validate input, resolve the caller's tenant scope, and
//! delegate to the repositories (entity CRUD) or the engine crate (fan-out
//! and analytics). No handler computes progress status or tenant filters on
//! its own.

pub mod analytics;
pub mod assignments;
pub mod departments;
pub mod evaluations;
pub mod trainings;
pub mod users;

use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;

use crate::error::AppError;

/// Resolve the concrete tenant for a write.
///
/// Stored rows always belong to exactly one tenant, so entity creation
/// rejects the unscoped (`*`) header rather than inventing an owner.
pub(crate) fn write_tenant(scope: TenantScope) -> Result<DbId, AppError> {
    scope.as_param().ok_or_else(|| {
        AppError::BadRequest("writes require a concrete tenant scope, not '*'".into())
    })
}
