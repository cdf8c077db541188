//! Authentication extractor for Axum handlers.
//!
//! Per-request pipeline: extract a token (cookie first, then bearer
//! header), verify signature and expiry, resolve the claimed identity in
//! the store, attach the safe identity view. Failure at any step
//! short-circuits with 401. Unknown identity is reported with the same
//! message as a bad token so responses don't reveal whether an account
//! exists.

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, AUTHORIZATION};
use axum::http::request::Parts;
use habitly_core::error::CoreError;
use habitly_db::models::user::UserView;
use habitly_db::repositories::UserRepo;

use crate::auth::cookies::{extract_cookie, ACCESS_TOKEN_COOKIE};
use crate::auth::tokens::verify_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the access-token cookie or an
/// `Authorization: Bearer` header.
///
/// Use as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity view -- no password hash, no refresh token.
    pub user: UserView,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_cookie(&parts.headers, ACCESS_TOKEN_COOKIE)
            .or_else(|| bearer_token(&parts.headers))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Unauthorized request".into()))
            })?;

        let claims = verify_access_token(&token, &state.config.auth).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid access token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid access token".into()))
            })?;

        Ok(AuthUser { user: user.into() })
    }
}

/// Pull a token out of `Authorization: Bearer <token>`, if present.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
