//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use learnbase_core::scope::{AnalyticsScope, TenantScope};
use learnbase_core::types::{DbId, Timestamp};
use serde::Deserialize;

use crate::error::AppError;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handlers before they reach the repositories.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit_or(&self, default: i64, max: i64) -> i64 {
        learnbase_core::analytics::clamp_limit(self.limit, default, max)
    }

    pub fn offset_or_zero(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Cross-cutting analytics filters (`?department_id=&from=&until=`).
///
/// The tenant dimension comes from the `x-tenant-id` header, never from the
/// query string; these are the remaining scope fields.
#[derive(Debug, Deserialize)]
pub struct ScopeParams {
    pub department_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

impl ScopeParams {
    /// Combine with the header-derived tenant into a full analytics scope.
    /// An inverted date window is rejected rather than silently matching
    /// nothing.
    pub fn into_scope(self, tenant: TenantScope) -> Result<AnalyticsScope, AppError> {
        if let (Some(from), Some(until)) = (self.from, self.until) {
            if from > until {
                return Err(AppError::BadRequest(
                    "'from' must not be later than 'until'".into(),
                ));
            }
        }
        Ok(AnalyticsScope {
            tenant,
            department_id: self.department_id,
            from: self.from,
            until: self.until,
        })
    }
}
