//! User credential model and DTOs.

use habitly_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Carries the password hash and the refresh-token slot. This struct is
/// deliberately NOT `Serialize` -- convert to [`UserView`] before anything
/// leaves the process.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub profile_image_url: Option<String>,
    pub password_hash: String,
    /// The single active refresh token for this identity, or `None` when
    /// logged out. A presented refresh token is only valid if it
    /// string-equals this slot.
    pub refresh_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no hash, no refresh token).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub profile_image_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a user.
///
/// `password` is plaintext; [`crate::repositories::UserRepo::create`]
/// hashes it before the row is written.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub profile_image_url: Option<String>,
    pub password: String,
}

/// DTO for profile updates. Only non-`None` fields are applied, and only
/// the owning identity may apply them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub profile_image_url: Option<String>,
}
