//! Repository for the `users` table -- the credential store.
//!
//! `create` and `update_password` take plaintext passwords and run the
//! hasher themselves, so hashing is visible at these two call sites and
//! nowhere else. `update_refresh_token` deliberately touches only the
//! refresh slot: setting or clearing a session must never re-run any
//! password-related logic.

use habitly_core::password::hash_password;
use sqlx::PgPool;
use habitly_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, full_name, profile_image_url, \
                        password_hash, refresh_token, created_at, updated_at";

/// Credential store operations.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, hashing the plaintext password first.
    ///
    /// Fails with [`StoreError::Duplicate`] if the username or email is
    /// already taken (case-insensitive, enforced by `uq_users_*` indexes).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, StoreError> {
        let password_hash =
            hash_password(&input.password).map_err(|e| StoreError::Hash(e.to_string()))?;

        let query = format!(
            "INSERT INTO users (username, email, full_name, profile_image_url, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.profile_image_url)
            .bind(&password_hash)
            .fetch_one(pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by login identifier -- matches username OR email,
    /// case-insensitively.
    pub async fn find_by_login_identifier(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1)"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the stored refresh token.
    ///
    /// Unconditional overwrite: a concurrent login by the same identity
    /// simply invalidates the prior session (single active session per
    /// user, last writer wins).
    pub async fn update_refresh_token(
        pool: &PgPool,
        id: DbId,
        token: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET refresh_token = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Re-hash and persist a new password. Returns `true` if the row was
    /// updated. The refresh slot is left untouched.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        new_password: &str,
    ) -> Result<bool, StoreError> {
        let password_hash =
            hash_password(new_password).map_err(|e| StoreError::Hash(e.to_string()))?;

        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(&password_hash)
                .execute(pool)
                .await
                .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    /// Update profile metadata. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                full_name = COALESCE($2, full_name),
                profile_image_url = COALESCE($3, profile_image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.profile_image_url)
            .fetch_optional(pool)
            .await
    }
}
