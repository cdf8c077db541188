//! Store-level error type.
//!
//! Repositories that only read or write rows return plain `sqlx::Error`.
//! The two operations that hash passwords internally (`create`,
//! `update_password`) need a wider channel, and unique-constraint
//! violations are promoted to [`StoreError::Duplicate`] so callers can map
//! them to a 409 without inspecting driver codes.

/// Errors produced by the credential store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint (named `uq_*`) was violated on insert.
    #[error("duplicate value violates unique constraint: {0}")]
    Duplicate(String),

    /// Password hashing failed before the row was written.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Any other database error.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a sqlx error, promoting PostgreSQL unique violations
    /// (error code 23505) to [`StoreError::Duplicate`].
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Duplicate(constraint);
            }
        }
        StoreError::Sqlx(err)
    }
}
