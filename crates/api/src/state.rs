use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bauportal_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob store holding the uploaded document bytes.
    pub blobs: Arc<dyn BlobStore>,
}
