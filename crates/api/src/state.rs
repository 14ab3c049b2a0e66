use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: learnbase_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cancelled when the process starts graceful shutdown; in-flight
    /// fan-outs observe it and abort before their bulk insert.
    pub shutdown: CancellationToken,
}
