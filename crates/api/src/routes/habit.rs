//! Route definitions for the `/habits` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::habit;
use crate::state::AppState;

/// Routes mounted at `/habits`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(habit::list_habits).post(habit::create_habit))
        .route(
            "/{id}",
            get(habit::get_habit)
                .patch(habit::update_habit)
                .delete(habit::delete_habit),
        )
        .route(
            "/{id}/progress",
            get(habit::list_progress).put(habit::upsert_progress),
        )
}
