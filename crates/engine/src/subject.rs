//! Scoped subject resolution shared by the write and read paths.

use learnbase_core::scope::TenantScope;
use learnbase_core::types::DbId;
use learnbase_db::models::assignment::SubjectKind;
use learnbase_db::repositories::{EvaluationRepo, TrainingRepo};
use sqlx::PgPool;

use crate::EngineError;

/// Resolve a subject's owning tenant, honoring the caller's scope.
///
/// A subject that does not exist and one the scope cannot see are the same
/// failure; the distinction would leak existence across tenants.
pub(crate) async fn resolve_subject_tenant(
    pool: &PgPool,
    scope: TenantScope,
    kind: SubjectKind,
    subject_id: DbId,
) -> Result<DbId, EngineError> {
    let tenant_id = match kind {
        SubjectKind::Training => TrainingRepo::find_by_id(pool, scope, subject_id)
            .await?
            .map(|t| t.tenant_id),
        SubjectKind::Evaluation => EvaluationRepo::find_by_id(pool, scope, subject_id)
            .await?
            .map(|e| e.tenant_id),
    };
    tenant_id.ok_or_else(|| EngineError::not_found_or_forbidden("subject"))
}
