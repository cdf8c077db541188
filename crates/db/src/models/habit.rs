//! Habit entity model and DTOs.

use chrono::NaiveDate;
use habitly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Habit priority, stored as the `habit_priority` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "habit_priority", rename_all = "lowercase")]
pub enum HabitPriority {
    Low,
    Medium,
    High,
}

/// Full habit row from the `habits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    /// Completions aimed for per tracking period. Always >= 1.
    pub target: i32,
    pub priority: HabitPriority,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One day's progress entry for a habit. At most one row per
/// `(habit_id, day)`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: DbId,
    pub habit_id: DbId,
    pub day: NaiveDate,
    pub completed: bool,
}

/// DTO for creating a habit.
#[derive(Debug, Deserialize)]
pub struct CreateHabit {
    pub name: String,
    pub target: i32,
    /// Defaults to `medium` when omitted.
    pub priority: Option<HabitPriority>,
    pub notes: Option<String>,
}

/// DTO for updating a habit. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabit {
    pub name: Option<String>,
    pub target: Option<i32>,
    pub priority: Option<HabitPriority>,
    pub notes: Option<String>,
}

/// DTO for recording a day's progress.
#[derive(Debug, Deserialize)]
pub struct UpsertProgress {
    pub day: NaiveDate,
    pub completed: bool,
}
