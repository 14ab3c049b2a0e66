//! Engine error type.

use learnbase_core::error::CoreError;

/// Errors surfaced by the fan-out and analytics services.
///
/// Domain failures ride the `Core` variant; storage failures propagate
/// unmodified so callers can classify them (the engine performs no retries
/// in either direction — writes are retry-safe by idempotency, reads by
/// nature).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl EngineError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::Core(CoreError::InvalidArgument(message.into()))
    }

    pub fn not_found_or_forbidden(entity: &'static str) -> Self {
        Self::Core(CoreError::NotFoundOrForbidden { entity })
    }
}
