//! Shared application state for the web API.
//!
//! The two store handles are the only path to the databases: handlers get
//! them from here per request, there is no global connection anywhere.

use std::sync::Arc;

use crate::config::PlantaConfig;
use crate::database::SupervisionStore;
use crate::reconciliation::ReconciliationEngine;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlantaConfig>,

    /// Authoritative store, target of approvals and the listing endpoints.
    pub main_store: Arc<dyn SupervisionStore>,

    /// Pending-entry store, cleaned up as decisions finalize.
    pub staging_store: Arc<dyn SupervisionStore>,

    pub engine: Arc<ReconciliationEngine>,
}

impl AppState {
    pub fn new(
        config: PlantaConfig,
        main_store: Arc<dyn SupervisionStore>,
        staging_store: Arc<dyn SupervisionStore>,
    ) -> Self {
        let engine = Arc::new(ReconciliationEngine::new(
            main_store.clone(),
            staging_store.clone(),
        ));

        Self {
            config: Arc::new(config),
            main_store,
            staging_store,
            engine,
        }
    }
}
