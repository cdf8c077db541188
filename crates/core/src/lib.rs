//! Shared domain types, errors, and password hashing for the Habitly backend.

pub mod error;
pub mod password;
pub mod types;
