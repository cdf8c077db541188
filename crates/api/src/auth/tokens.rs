//! Signed token pair: short-lived access tokens and long-lived refresh
//! tokens, both HS256 JWTs.
//!
//! The two token kinds are signed with independent secrets, so a leaked
//! access secret does not let an attacker mint refresh tokens (or vice
//! versa). Refresh validity is additionally gated server-side: the
//! presented token must string-equal the slot stored on the user row.

use habitly_core::types::DbId;
use habitly_db::models::user::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Claims embedded in every access token. Serialized camelCase like
/// every other external wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    pub full_name: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Claims embedded in every refresh token. Minimal surface: identity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: DbId,
    pub iat: i64,
    pub exp: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Token signing configuration: two secrets, two lifetimes.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_secret: String,
    /// HMAC-SHA256 secret for refresh tokens. Must differ from the access
    /// secret for the two-secret design to mean anything.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_expiry_days: i64,
}

impl AuthConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `ACCESS_TOKEN_SECRET`        | **yes**  | --      |
    /// | `REFRESH_TOKEN_SECRET`       | **yes**  | --      |
    /// | `ACCESS_TOKEN_EXPIRY_MINS`   | no       | `15`    |
    /// | `REFRESH_TOKEN_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if either secret is unset or empty. Misconfiguration should
    /// fail at startup, not at the first login.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .expect("ACCESS_TOKEN_SECRET must be set in the environment");
        assert!(!access_secret.is_empty(), "ACCESS_TOKEN_SECRET must not be empty");

        let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET")
            .expect("REFRESH_TOKEN_SECRET must be set in the environment");
        assert!(!refresh_secret.is_empty(), "REFRESH_TOKEN_SECRET must not be empty");

        let access_expiry_mins: i64 = std::env::var("ACCESS_TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRY_MINS must be a valid i64");

        let refresh_expiry_days: i64 = std::env::var("REFRESH_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("REFRESH_TOKEN_EXPIRY_DAYS must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_expiry_mins,
            refresh_expiry_days,
        }
    }
}

/// Sign an access token carrying the user's identity claims.
pub fn issue_access_token(
    user: &User,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user.id,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        iat: now,
        exp: now + config.access_expiry_mins * 60,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.access_secret.as_bytes()),
    )
}

/// Sign a refresh token carrying only the user id.
pub fn issue_refresh_token(
    user_id: DbId,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = RefreshClaims {
        sub: user_id,
        iat: now,
        exp: now + config.refresh_expiry_days * 86_400,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )
}

/// Validate and decode an access token.
///
/// Signature and expiry are checked by the JWT layer.
pub fn verify_access_token(token: &str, config: &AuthConfig) -> Result<AccessClaims, TokenError> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Validate and decode a refresh token against the refresh secret.
pub fn verify_refresh_token(
    token: &str,
    config: &AuthConfig,
) -> Result<RefreshClaims, TokenError> {
    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
