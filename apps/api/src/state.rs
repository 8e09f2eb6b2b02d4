use std::sync::Arc;

use crate::config::Config;
use crate::drafts::session::SessionRegistry;
use crate::generation_client::GenerationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generation: GenerationClient,
    /// Draft sessions keyed by the editor-supplied session id.
    pub sessions: Arc<SessionRegistry>,
    pub config: Config,
}

impl AppState {
    pub fn new(generation: GenerationClient, config: Config) -> Self {
        Self {
            generation,
            sessions: Arc::new(SessionRegistry::new(config.session_idle_ttl)),
            config,
        }
    }
}
