use std::sync::Arc;

use catcollector_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catcollector_db::DbPool,
    /// Server configuration (session secret, bucket, key prefix).
    pub config: Arc<ServerConfig>,
    /// Object store that receives uploaded cat photos.
    pub store: Arc<dyn ObjectStore>,
}
