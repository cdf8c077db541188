//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the row carries secrets, a separate `Serialize` view struct
//!   for external output

pub mod habit;
pub mod user;
