//! Order-authenticity verification seam.
//!
//! License generation is only supposed to happen after a real purchase, so
//! somebody hitting `/generate` directly should not get free keys. The
//! check itself depends on the payment provider, which is not integrated
//! yet; the trait keeps the relay logic independent of whichever provider
//! lands.

use async_trait::async_trait;

use crate::error::UpstreamError;

/// Verifies that an order identifier corresponds to a real purchase.
///
/// Implementations must be `Send + Sync` so a single verifier can serve
/// concurrent requests.
#[async_trait]
pub trait OrderVerifier: Send + Sync {
    /// Confirm the order is authentic.
    ///
    /// # Errors
    /// Returns an [`UpstreamError`] when the order cannot be verified; the
    /// gateway surfaces it as a 500.
    async fn verify(&self, order: &str) -> Result<(), UpstreamError>;
}

/// Verifier that accepts every order identifier.
///
/// TODO: replace with a payment-provider check (e.g. confirm the order ID
/// against the provider's API) once that integration exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllOrders;

#[async_trait]
impl OrderVerifier for AcceptAllOrders {
    async fn verify(&self, _order: &str) -> Result<(), UpstreamError> {
        Ok(())
    }
}
