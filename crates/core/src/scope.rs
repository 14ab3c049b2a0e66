//! Explicit query scoping.
//!
//! Every read that can be tenant-scoped takes its scope as an explicit
//! parameter. "Unscoped" is a distinct, privileged variant that callers must
//! spell out (and which the facade logs) — it is never an ambient default.

use std::fmt;

use crate::types::{DbId, Timestamp};

/// Tenant visibility of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Restricted to a single tenant; every row read must carry this id.
    Tenant(DbId),
    /// Elevated, platform-wide visibility. Read paths only: stored rows
    /// always belong to a concrete tenant.
    Unscoped,
}

impl TenantScope {
    /// Bind-parameter form: `None` disables the tenant predicate.
    ///
    /// Queries apply it as `($n::BIGINT IS NULL OR tenant_id = $n)` so the
    /// filter is always a structured parameter, never interpolated text.
    pub fn as_param(self) -> Option<DbId> {
        match self {
            Self::Tenant(id) => Some(id),
            Self::Unscoped => None,
        }
    }

    pub fn is_unscoped(self) -> bool {
        matches!(self, Self::Unscoped)
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tenant(id) => write!(f, "tenant {id}"),
            Self::Unscoped => write!(f, "unscoped"),
        }
    }
}

/// Cross-cutting filter for the analytics query family.
///
/// The date window filters on `assigned_at`, except where an operation
/// defines its own anchor (monthly trend buckets completions by
/// `completed_at`).
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsScope {
    pub tenant: TenantScope,
    /// Restrict to assignments held by members of this department.
    pub department_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

impl AnalyticsScope {
    pub fn tenant(tenant_id: DbId) -> Self {
        Self {
            tenant: TenantScope::Tenant(tenant_id),
            department_id: None,
            from: None,
            until: None,
        }
    }

    pub fn unscoped() -> Self {
        Self {
            tenant: TenantScope::Unscoped,
            department_id: None,
            from: None,
            until: None,
        }
    }

    pub fn with_department(mut self, department_id: DbId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn with_window(mut self, from: Option<Timestamp>, until: Option<Timestamp>) -> Self {
        self.from = from;
        self.until = until;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
