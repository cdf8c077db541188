//! Handlers for the `/auth` resource (signup, login, logout, refresh,
//! change-password).

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::header::{HeaderMap, InvalidHeaderValue, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use habitly_core::error::CoreError;
use habitly_core::password::{validate_password_strength, verify_password};
use habitly_db::error::StoreError;
use habitly_db::models::user::{CreateUser, User, UserView};
use habitly_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::cookies::{
    clear_cookie, extract_cookie, token_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::auth::tokens::{issue_access_token, issue_refresh_token, verify_refresh_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::uploads::ALLOWED_IMAGE_TYPES;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. At least one of `username` /
/// `email` must be present.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Optional JSON body for `POST /auth/refresh`; the cookie takes
/// precedence when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Payload returned by login and refresh. Tokens ride in the body as well
/// as in cookies so non-cookie clients can use them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: UserView,
    pub access_token: String,
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Multipart form: `username`, `email`, `fullName`, `password`, optional
/// `profilePic` file. Returns 201 with the identity view; the password
/// hash and refresh slot never appear in the response.
pub async fn signup(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UserView>> {
    let mut username = String::new();
    let mut email = String::new();
    let mut full_name = String::new();
    let mut password = String::new();
    let mut image: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => username = text_field(field).await?,
            "email" => email = text_field(field).await?,
            "fullName" => full_name = text_field(field).await?,
            "password" => password = text_field(field).await?,
            "profilePic" => {
                let filename = field.file_name().unwrap_or("profile").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                image = Some((filename, content_type, bytes.to_vec()));
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let username = username.trim().to_lowercase();
    let email = email.trim().to_lowercase();
    let full_name = full_name.trim().to_string();

    if username.is_empty() || email.is_empty() || full_name.is_empty() || password.trim().is_empty()
    {
        return Err(CoreError::Validation("All fields are required".into()).into());
    }
    validate_password_strength(&password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let mut profile_image_url = None;
    if let Some((filename, content_type, bytes)) = image {
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(CoreError::Validation(
                "Invalid profile picture format. Only JPEG and PNG are allowed".into(),
            )
            .into());
        }
        let url = state
            .image_store
            .put(&filename, &content_type, &bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Profile image upload failed: {e}")))?;
        profile_image_url = Some(url);
    }

    let input = CreateUser {
        username,
        email,
        full_name,
        profile_image_url,
        password,
    };
    let user = UserRepo::create(&state.pool, &input)
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => AppError::Core(CoreError::Conflict(
                "User with this email or username already exists".into(),
            )),
            other => AppError::Store(other),
        })?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        UserView::from(user),
        "User signed up successfully",
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username or email plus password. Issues a token
/// pair, persists the refresh slot, and sets both cookies.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let identifier = input
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            input
                .email
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("Username or email is required".into()))
        })?;

    let user = UserRepo::find_by_login_identifier(&state.pool, identifier)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("User does not exist".into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(CoreError::Unauthorized("Invalid user credentials".into()).into());
    }

    create_auth_response(&state, user, "User logged in successfully").await
}

/// POST /api/v1/auth/logout
///
/// Clears the stored refresh slot and expires both cookies.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<Response> {
    UserRepo::update_refresh_token(&state.pool, auth.user.id, None).await?;

    let cookies = AppendHeaders([
        (SET_COOKIE, clear_cookie(ACCESS_TOKEN_COOKIE).map_err(cookie_error)?),
        (SET_COOKIE, clear_cookie(REFRESH_TOKEN_COOKIE).map_err(cookie_error)?),
    ]);

    Ok((
        cookies,
        ApiResponse::new(StatusCode::OK, (), "User logged out successfully"),
    )
        .into_response())
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token (cookie or body) for a new pair. The
/// presented token must string-equal the stored slot: a stale token --
/// replayed after a newer refresh already rotated it -- is rejected.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> AppResult<Response> {
    // Cookie takes precedence; the body is optional JSON.
    let presented = extract_cookie(&headers, REFRESH_TOKEN_COOKIE)
        .or_else(|| {
            serde_json::from_slice::<RefreshRequest>(&body)
                .ok()
                .and_then(|b| b.refresh_token)
        })
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized request".into())))?;

    let claims = verify_refresh_token(&presented, &state.config.auth)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid refresh token".into())))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid refresh token".into()))
        })?;

    // Rotation check: only the most recently issued refresh token lives in
    // the slot. An empty slot (logged out) fails the same way.
    if user.refresh_token.as_deref() != Some(presented.as_str()) {
        return Err(CoreError::Unauthorized("Refresh token is expired or used".into()).into());
    }

    create_auth_response(&state, user, "Access token refreshed").await
}

/// POST /api/v1/auth/change-password
///
/// Verifies the old password, re-hashes and persists the new one. Tokens
/// issued before the change stay valid until their natural expiry.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    // Re-fetch the full row: the extractor deliberately drops the hash.
    let user = UserRepo::find_by_id(&state.pool, auth.user.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid access token".into()))
        })?;

    let old_valid = verify_password(&input.old_password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;

    if !old_valid {
        return Err(CoreError::Validation("Old password is incorrect".into()).into());
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    UserRepo::update_password(&state.pool, user.id, &input.new_password).await?;

    Ok(ApiResponse::new(
        StatusCode::OK,
        (),
        "Password changed successfully",
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token pair, persist the refresh slot (unconditional overwrite),
/// and build the response: tokens in cookies and in the body.
async fn create_auth_response(
    state: &AppState,
    user: User,
    message: &str,
) -> AppResult<Response> {
    let auth = &state.config.auth;

    let access_token = issue_access_token(&user, auth)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;
    let refresh_token = issue_refresh_token(user.id, auth)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    UserRepo::update_refresh_token(&state.pool, user.id, Some(&refresh_token)).await?;

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            token_cookie(
                ACCESS_TOKEN_COOKIE,
                &access_token,
                auth.access_expiry_mins * 60,
            )
            .map_err(cookie_error)?,
        ),
        (
            SET_COOKIE,
            token_cookie(
                REFRESH_TOKEN_COOKIE,
                &refresh_token,
                auth.refresh_expiry_days * 86_400,
            )
            .map_err(cookie_error)?,
        ),
    ]);

    let payload = AuthPayload {
        user: user.into(),
        access_token,
        refresh_token,
    };

    Ok((
        cookies,
        ApiResponse::new(StatusCode::OK, payload, message),
    )
        .into_response())
}

async fn text_field(field: Field<'_>) -> AppResult<String> {
    field.text().await.map_err(bad_multipart)
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Core(CoreError::Validation(format!("Malformed multipart body: {err}")))
}

fn cookie_error(err: InvalidHeaderValue) -> AppError {
    AppError::Internal(format!("Cookie assembly error: {err}"))
}
