use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One orchestrator for the whole service; its snapshot tracks the latest run.
    pub orchestrator: Arc<Orchestrator>,
    pub config: Config,
}
