//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use habitly_core::error::CoreError;
use habitly_db::models::user::{UpdateProfile, UserView};
use habitly_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/profile
///
/// Return the authenticated identity view.
pub async fn get_profile(auth: AuthUser) -> ApiResponse<UserView> {
    ApiResponse::new(StatusCode::OK, auth.user, "Current user fetched successfully")
}

/// PATCH /api/v1/profile
///
/// Update `fullName` / `profileImageUrl` for the authenticated identity.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<ApiResponse<UserView>> {
    let full_name = input.full_name.map(|s| s.trim().to_string());
    if full_name.as_deref() == Some("") {
        return Err(CoreError::Validation("fullName must not be empty".into()).into());
    }

    let input = UpdateProfile {
        full_name,
        profile_image_url: input.profile_image_url,
    };

    let user = UserRepo::update_profile(&state.pool, auth.user.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("User not found".into())))?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        user.into(),
        "Profile updated successfully",
    ))
}
