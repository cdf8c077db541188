use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::ImageStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: habitly_db::DbPool,
    /// Server configuration (secrets, expiries, timeouts).
    pub config: Arc<ServerConfig>,
    /// One-way object store for profile images.
    pub image_store: Arc<dyn ImageStore>,
}
