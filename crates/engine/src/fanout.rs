//! Assignment fan-out service.
//!
//! One call turns `(subject, targets)` into assignment rows: departments are
//! expanded to their current member snapshot, the union is deduplicated, and
//! everything lands in the store through a single conflict-ignoring bulk
//! insert. Re-running the same request is a no-op, so callers retry the
//! whole call on any failure.

use std::collections::BTreeSet;

use learnbase_core::error::CoreError;
use learnbase_core::fanout::{expand_targets, ResolvedTarget};
use learnbase_core::scope::TenantScope;
use learnbase_core::target::{Target, TargetKind};
use learnbase_core::types::DbId;
use learnbase_db::models::assignment::SubjectKind;
use learnbase_db::repositories::{AssignmentRepo, DepartmentRepo, UserRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::subject::resolve_subject_tenant;
use crate::EngineError;

/// A fan-out request: assign one subject to a batch of targets.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRequest {
    pub subject_kind: SubjectKind,
    pub subject_id: DbId,
    pub targets: Vec<Target>,
}

/// Counts reported back to the caller. `skipped` lists the targets that
/// could not be resolved; it is informational, never a failure.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOutcome {
    pub requested: i64,
    pub expanded_users: i64,
    pub newly_assigned: i64,
    pub already_assigned: i64,
    pub skipped: Vec<Target>,
}

/// Assign a subject to every resolved target user.
///
/// The subject must be visible in `scope`. Target users and departments
/// resolve within the subject's own tenant — created rows always carry that
/// tenant id, including for unscoped (platform-level) callers — and ids that
/// do not resolve are reported in `skipped` rather than failing the batch.
///
/// The bulk insert is one atomic statement raced against `cancel`: on
/// cancellation the call reports [`CoreError::Cancelled`] and the caller
/// retries the whole fan-out, which is safe because existing rows are left
/// untouched (`assigned_at`, `completed_at`, and `score` never reset).
pub async fn assign_subject_to_targets(
    pool: &PgPool,
    scope: TenantScope,
    request: &AssignmentRequest,
    cancel: &CancellationToken,
) -> Result<AssignmentOutcome, EngineError> {
    if request.targets.is_empty() {
        return Err(EngineError::invalid_argument("target set is empty"));
    }

    if scope.is_unscoped() {
        tracing::warn!(
            subject_kind = request.subject_kind.as_str(),
            subject_id = request.subject_id,
            "unscoped fan-out requested"
        );
    }

    let tenant_id =
        resolve_subject_tenant(pool, scope, request.subject_kind, request.subject_id).await?;
    let subject_scope = TenantScope::Tenant(tenant_id);

    // One round trip validates every directly targeted user.
    let direct_ids: Vec<DbId> = request
        .targets
        .iter()
        .filter(|t| t.kind == TargetKind::User)
        .map(|t| t.id)
        .collect();
    let known_users: BTreeSet<DbId> = UserRepo::filter_existing(pool, subject_scope, &direct_ids)
        .await?
        .into_iter()
        .collect();

    let mut resolved = Vec::with_capacity(request.targets.len());
    for target in &request.targets {
        match target.kind {
            TargetKind::User => resolved.push(ResolvedTarget::User {
                id: target.id,
                known: known_users.contains(&target.id),
            }),
            TargetKind::Department => {
                let members = match DepartmentRepo::find_by_id(pool, subject_scope, target.id)
                    .await?
                {
                    Some(department) => {
                        Some(DepartmentRepo::member_user_ids(pool, department.id).await?)
                    }
                    None => None,
                };
                resolved.push(ResolvedTarget::Department {
                    id: target.id,
                    members,
                });
            }
        }
    }

    let plan = expand_targets(resolved);
    let users: Vec<DbId> = plan.users.iter().copied().collect();
    let expanded_users = users.len() as i64;

    let newly_assigned = if users.is_empty() {
        0
    } else {
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled.into());
        }
        tokio::select! {
            _ = cancel.cancelled() => return Err(CoreError::Cancelled.into()),
            inserted = AssignmentRepo::bulk_assign(
                pool,
                request.subject_kind,
                request.subject_id,
                tenant_id,
                &users,
            ) => inserted? as i64,
        }
    };

    let outcome = AssignmentOutcome {
        requested: request.targets.len() as i64,
        expanded_users,
        newly_assigned,
        already_assigned: expanded_users - newly_assigned,
        skipped: plan.skipped,
    };
    tracing::info!(
        subject_kind = request.subject_kind.as_str(),
        subject_id = request.subject_id,
        requested = outcome.requested,
        expanded_users = outcome.expanded_users,
        newly_assigned = outcome.newly_assigned,
        already_assigned = outcome.already_assigned,
        skipped = outcome.skipped.len(),
        "fan-out completed"
    );
    Ok(outcome)
}
