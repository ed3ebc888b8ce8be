/// Errors produced by the `keybridge-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A license key string did not match the grouped-hex format.
    #[error("malformed license key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },
}
