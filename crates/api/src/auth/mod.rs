//! Token issuing/verification and cookie plumbing.

pub mod cookies;
pub mod tokens;
