pub mod auth;
pub mod habit;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup            signup (open, multipart)
/// /auth/login             login (open)
/// /auth/logout            logout (requires auth)
/// /auth/refresh           refresh (refresh-token-bearing)
/// /auth/change-password   change password (requires auth)
///
/// /profile                get, patch (requires auth)
///
/// /habits                 list, create (requires auth)
/// /habits/{id}            get, patch, delete
/// /habits/{id}/progress   list, upsert day entry (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/habits", habit::router())
}
