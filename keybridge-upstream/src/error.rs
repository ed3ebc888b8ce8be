//! Error types for the upstream client crate.

/// Errors that can occur while talking to the licensing vendor.
///
/// All variants translate to HTTP 500 at the gateway; the relay never
/// retries.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UpstreamError {
    /// The vendor returned a JSON-API `errors` array. The message is every
    /// error's `detail` joined with `", "`, which is surfaced verbatim to
    /// the caller.
    #[error("{0}")]
    Rejected(String),

    /// The outbound request failed at the transport level.
    #[error("licensing API request failed: {0}")]
    Network(String),

    /// The vendor's response body could not be interpreted.
    #[error("unexpected licensing API response: {0}")]
    Decode(String),
}
