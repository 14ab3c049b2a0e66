/// Domain-level error taxonomy.
///
/// `NotFoundOrForbidden` deliberately merges "does not exist" with "not
/// yours": a tenant-scoped caller must not be able to probe for the
/// existence of another tenant's records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} not found or not accessible")]
    NotFoundOrForbidden { entity: &'static str },

    #[error("Operation cancelled before completion")]
    Cancelled,
}
