//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod habit_repo;
pub mod user_repo;

pub use habit_repo::HabitRepo;
pub use user_repo::UserRepo;
