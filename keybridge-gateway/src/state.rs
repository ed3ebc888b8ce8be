//! Shared handler state: the vendor client plus the order-verification
//! capability, built once at startup and injected into every handler.

use std::sync::Arc;

use keybridge_upstream::{AcceptAllOrders, LicensingClient, OrderVerifier, UpstreamConfig};

/// Immutable state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the licensing vendor.
    pub client: LicensingClient,
    /// Order-authenticity check applied before license generation.
    pub verifier: Arc<dyn OrderVerifier>,
}

impl AppState {
    /// Build state with the default (accept-all) order verifier.
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self::with_verifier(config, Arc::new(AcceptAllOrders))
    }

    /// Build state with an explicit order verifier, e.g. a payment-provider
    /// check.
    #[must_use]
    pub fn with_verifier(config: UpstreamConfig, verifier: Arc<dyn OrderVerifier>) -> Self {
        Self {
            client: LicensingClient::new(config),
            verifier,
        }
    }
}
