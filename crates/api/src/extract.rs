use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use learnbase_core::scope::TenantScope;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's tenant scope, set by the upstream tenant
/// resolver. The API never derives tenancy from anything else.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Tenant scope extracted from the `x-tenant-id` header.
///
/// Use this as an extractor parameter in any handler that reads or writes
/// tenant-owned data:
///
/// ```ignore
/// async fn my_handler(tenant: TenantContext) -> AppResult<Json<()>> {
///     let scope = tenant.scope();
///     Ok(Json(()))
/// }
/// ```
///
/// A numeric value scopes the request to that tenant. The literal `*`
/// requests unscoped, platform-wide visibility; it must be spelled out and
/// every such request is logged. A missing or malformed header rejects with
/// 400 — there is no ambient default scope.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub TenantScope);

impl TenantContext {
    pub fn scope(self) -> TenantScope {
        self.0
    }
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(TENANT_HEADER)
            .ok_or_else(|| AppError::BadRequest(format!("Missing {TENANT_HEADER} header")))?
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("Invalid {TENANT_HEADER} header")))?
            .trim();

        if raw == "*" {
            tracing::info!(path = %parts.uri.path(), "unscoped request");
            return Ok(Self(TenantScope::Unscoped));
        }

        let tenant_id: i64 = raw.parse().map_err(|_| {
            AppError::BadRequest(format!(
                "{TENANT_HEADER} must be a positive integer or '*'"
            ))
        })?;
        if tenant_id <= 0 {
            return Err(AppError::BadRequest(format!(
                "{TENANT_HEADER} must be a positive integer or '*'"
            )));
        }

        Ok(Self(TenantScope::Tenant(tenant_id)))
    }
}
