//! # Application State
//!
//! Shared state for the gateway router, passed to handlers via the `State`
//! extractor. Everything here is constructed by the process entry point
//! (or a test) and injected; there is no process-wide mutable state.

use std::sync::Arc;

use billgate_client::DocumentClient;
use billgate_core::{AuthorizationOracle, StaticPolicy};
use billgate_ledger::ReleaseLedger;

use crate::config::GatewayConfig;
use crate::middleware::metrics::ApiMetrics;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub ledger: ReleaseLedger,
    pub policy: Arc<dyn AuthorizationOracle>,
    pub documents: DocumentClient,
    pub config: GatewayConfig,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// State with the built-in authorization table.
    pub fn new(ledger: ReleaseLedger, documents: DocumentClient, config: GatewayConfig) -> Self {
        Self::with_policy(ledger, Arc::new(StaticPolicy::default()), documents, config)
    }

    pub fn with_policy(
        ledger: ReleaseLedger,
        policy: Arc<dyn AuthorizationOracle>,
        documents: DocumentClient,
        config: GatewayConfig,
    ) -> Self {
        Self {
            ledger,
            policy,
            documents,
            config,
            metrics: ApiMetrics::new(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("ledger", &self.ledger)
            .field("documents", &self.documents)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
