//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use orchestrator::Orchestrator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Chat turn pipeline, backed by the same database.
    pub orchestrator: Arc<Orchestrator<Database>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, orchestrator: Orchestrator<Database>) -> Self {
        Self {
            db,
            orchestrator: Arc::new(orchestrator),
        }
    }
}
