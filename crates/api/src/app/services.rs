//! Dependency wiring for the HTTP layer.

use std::sync::Arc;

use insights_ai::{AnalysisEngine, ChatCompletion, GrokClient};
use insights_infra::{AnalysisStore, InMemoryAnalysisStore};

/// Explicitly constructed application services, injected into handlers via
/// `Extension<Arc<AppServices>>`. Dropping this drops the store and its
/// contents — acceptable, the store is in-memory by design.
pub struct AppServices {
    store: Arc<dyn AnalysisStore>,
    engine: AnalysisEngine,
}

impl AppServices {
    pub fn new(store: Arc<dyn AnalysisStore>, chat: Arc<dyn ChatCompletion>) -> Self {
        Self {
            store,
            engine: AnalysisEngine::new(chat),
        }
    }

    /// Production wiring: fresh in-memory store, model client configured
    /// from the process environment (`GROK_API_KEY`).
    pub fn from_env() -> Self {
        Self::new(InMemoryAnalysisStore::arc(), Arc::new(GrokClient::from_env()))
    }

    pub fn store(&self) -> &dyn AnalysisStore {
        self.store.as_ref()
    }

    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }
}
