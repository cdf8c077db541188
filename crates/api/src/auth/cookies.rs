//! Cookie assembly and extraction for the token pair.
//!
//! Both tokens travel as `HttpOnly; Secure; SameSite=Strict` cookies.
//! None of the repos in our stack pull in a cookie crate, so the header
//! values are assembled directly; the attribute set is fixed and the
//! values are JWTs (URL-safe base64), so nothing here needs escaping.

use axum::http::header::{HeaderMap, InvalidHeaderValue, COOKIE};
use axum::http::HeaderValue;

/// Cookie name carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie name carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build a `Set-Cookie` value for a token cookie.
pub fn token_cookie(
    name: &str,
    value: &str,
    max_age_secs: i64,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; Secure; SameSite=Strict"
    ))
}

/// Build a `Set-Cookie` value that clears a token cookie: empty value,
/// `Max-Age=0`, identical attributes.
pub fn clear_cookie(name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=Strict"
    ))
}

/// Read a named cookie from the request `Cookie` header.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(name)?
            .strip_prefix('=')
            .map(str::to_string)
    })
}
