//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use keybridge_upstream::UpstreamError;

/// Errors that can occur during relay request handling.
///
/// All errors reach the caller as plaintext bodies; the relay has no
/// structured error payloads and no internal error codes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The caller omitted (or sent empty) a required form field.
    #[error("{field} is required for {action}")]
    MissingField {
        field: &'static str,
        action: &'static str,
    },

    /// The vendor reported the key invalid for a reason that cannot be
    /// resolved by activating.
    #[error("The license {0}")]
    LicenseInvalid(String),

    /// An error propagated from the vendor client.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::MissingField { .. } => StatusCode::BAD_REQUEST,
            GatewayError::LicenseInvalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
