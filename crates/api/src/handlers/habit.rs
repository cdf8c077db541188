//! Handlers for the `/habits` resource.
//!
//! Everything here requires authentication and is scoped to the current
//! user; asking for someone else's habit id behaves like a missing row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use habitly_core::error::CoreError;
use habitly_core::types::DbId;
use habitly_db::models::habit::{
    CreateHabit, Habit, ProgressEntry, UpdateHabit, UpsertProgress,
};
use habitly_db::repositories::HabitRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/habits
pub async fn list_habits(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<ApiResponse<Vec<Habit>>> {
    let habits = HabitRepo::list_for_user(&state.pool, auth.user.id).await?;
    Ok(ApiResponse::new(
        StatusCode::OK,
        habits,
        "Habits fetched successfully",
    ))
}

/// POST /api/v1/habits
pub async fn create_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateHabit>,
) -> AppResult<ApiResponse<Habit>> {
    let input = CreateHabit {
        name: input.name.trim().to_string(),
        ..input
    };
    validate_habit_fields(Some(&input.name), Some(input.target))?;

    let habit = HabitRepo::create(&state.pool, auth.user.id, &input).await?;
    Ok(ApiResponse::new(
        StatusCode::CREATED,
        habit,
        "Habit created successfully",
    ))
}

/// GET /api/v1/habits/{id}
pub async fn get_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Habit>> {
    let habit = find_owned(&state, &auth, id).await?;
    Ok(ApiResponse::new(
        StatusCode::OK,
        habit,
        "Habit fetched successfully",
    ))
}

/// PATCH /api/v1/habits/{id}
pub async fn update_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHabit>,
) -> AppResult<ApiResponse<Habit>> {
    let input = UpdateHabit {
        name: input.name.map(|s| s.trim().to_string()),
        ..input
    };
    validate_habit_fields(input.name.as_deref(), input.target)?;

    let habit = HabitRepo::update_for_user(&state.pool, auth.user.id, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("Habit not found".into())))?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        habit,
        "Habit updated successfully",
    ))
}

/// DELETE /api/v1/habits/{id}
pub async fn delete_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<()>> {
    let deleted = HabitRepo::delete_for_user(&state.pool, auth.user.id, id).await?;
    if !deleted {
        return Err(CoreError::NotFound("Habit not found".into()).into());
    }
    Ok(ApiResponse::new(
        StatusCode::OK,
        (),
        "Habit deleted successfully",
    ))
}

/// GET /api/v1/habits/{id}/progress
pub async fn list_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<ProgressEntry>>> {
    let habit = find_owned(&state, &auth, id).await?;
    let entries = HabitRepo::list_progress(&state.pool, habit.id).await?;
    Ok(ApiResponse::new(
        StatusCode::OK,
        entries,
        "Progress fetched successfully",
    ))
}

/// PUT /api/v1/habits/{id}/progress
///
/// Upsert one day's entry; recording the same day twice overwrites.
pub async fn upsert_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertProgress>,
) -> AppResult<ApiResponse<ProgressEntry>> {
    let habit = find_owned(&state, &auth, id).await?;
    let entry = HabitRepo::upsert_progress(&state.pool, habit.id, &input).await?;
    Ok(ApiResponse::new(
        StatusCode::OK,
        entry,
        "Progress recorded successfully",
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Habit> {
    HabitRepo::find_for_user(&state.pool, auth.user.id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("Habit not found".into())))
}

fn validate_habit_fields(name: Option<&str>, target: Option<i32>) -> AppResult<()> {
    if name == Some("") {
        return Err(CoreError::Validation("Habit name is required".into()).into());
    }
    if matches!(target, Some(t) if t < 1) {
        return Err(CoreError::Validation("Target must be at least 1".into()).into());
    }
    Ok(())
}
