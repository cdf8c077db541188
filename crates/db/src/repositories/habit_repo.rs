//! Repository for the `habits` and `habit_progress` tables.
//!
//! Every lookup is scoped by `user_id`, so a habit belonging to another
//! user behaves exactly like one that does not exist.

use habitly_core::types::DbId;
use sqlx::PgPool;

use crate::models::habit::{
    CreateHabit, Habit, HabitPriority, ProgressEntry, UpdateHabit, UpsertProgress,
};

const COLUMNS: &str = "id, user_id, name, target, priority, notes, created_at, updated_at";

const PROGRESS_COLUMNS: &str = "id, habit_id, day, completed";

/// CRUD and progress tracking for habits.
pub struct HabitRepo;

impl HabitRepo {
    /// Insert a new habit for the given user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateHabit,
    ) -> Result<Habit, sqlx::Error> {
        let query = format!(
            "INSERT INTO habits (user_id, name, target, priority, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.target)
            .bind(input.priority.unwrap_or(HabitPriority::Medium))
            .bind(input.notes.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    /// List the user's habits, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Habit>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM habits WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Habit>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's habits by id.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM habits WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update one of the user's habits. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the habit does not exist or belongs to someone else.
    pub async fn update_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateHabit,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!(
            "UPDATE habits SET
                name = COALESCE($3, name),
                target = COALESCE($4, target),
                priority = COALESCE($5, priority),
                notes = COALESCE($6, notes),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.target)
            .bind(input.priority)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's habits. Returns `true` if a row was removed.
    /// Progress entries go with it (FK cascade).
    pub async fn delete_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a day's progress, overwriting any existing entry for that day.
    pub async fn upsert_progress(
        pool: &PgPool,
        habit_id: DbId,
        input: &UpsertProgress,
    ) -> Result<ProgressEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO habit_progress (habit_id, day, completed)
             VALUES ($1, $2, $3)
             ON CONFLICT (habit_id, day) DO UPDATE SET completed = EXCLUDED.completed
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, ProgressEntry>(&query)
            .bind(habit_id)
            .bind(input.day)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    /// List a habit's progress entries in day order.
    pub async fn list_progress(
        pool: &PgPool,
        habit_id: DbId,
    ) -> Result<Vec<ProgressEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM habit_progress WHERE habit_id = $1 ORDER BY day"
        );
        sqlx::query_as::<_, ProgressEntry>(&query)
            .bind(habit_id)
            .fetch_all(pool)
            .await
    }
}
