use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::scoring::MatchScorer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Runtime settings, kept reachable from handlers without re-reading the
    /// environment.
    #[allow(dead_code)]
    pub config: Config,
    /// Pluggable match scorer. Default: TfidfScorer.
    pub scorer: Arc<dyn MatchScorer>,
    /// In-process bearer-token sessions; emptied entry-by-entry on logout.
    pub sessions: SessionStore,
}
