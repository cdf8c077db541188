/// Domain-level error taxonomy.
///
/// Every expected failure in the auth and habit flows is one of these
/// variants; the API layer maps them onto HTTP statuses
/// (400 / 401 / 404 / 409 / 500).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
