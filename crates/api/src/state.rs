use std::sync::Arc;

use leadrelay_db::SupabaseClient;
use leadrelay_engine::AnalysisEngineClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Clients are constructed once in `main` and injected here; cloning is
/// cheap (clients share their connection pools).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database collaborator.
    pub db: SupabaseClient,
    /// Analysis engine collaborator.
    pub engine: AnalysisEngineClient,
}
