use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::FileStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pawclass_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// File storage for course covers and certificates.
    pub files: Arc<FileStore>,
}
