use std::sync::Arc;

use keel_db::DatabaseClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database client. Connected by `main` before the server starts.
    pub db: Arc<DatabaseClient>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
