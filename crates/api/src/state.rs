use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::PlanSessions;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: callsheet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shot plans currently being edited, keyed by shooting day.
    pub sessions: Arc<PlanSessions>,
}
