//! Vendor API configuration, read once at process start.

use std::env;

/// Default vendor API base URL.
pub const DEFAULT_API_URL: &str = "https://api.keygen.sh";

/// Environment variable holding the product API token.
pub const TOKEN_VAR: &str = "KEYGEN_PRODUCT_TOKEN";

/// Environment variable holding the account identifier.
pub const ACCOUNT_VAR: &str = "KEYGEN_ACCOUNT_ID";

/// Environment variable holding the policy identifier.
pub const POLICY_VAR: &str = "KEYGEN_POLICY_ID";

/// Environment variable overriding the API base URL (used by tests to
/// point at a stub vendor).
pub const API_URL_VAR: &str = "KEYGEN_API_URL";

/// A required configuration value was missing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Immutable vendor API configuration.
///
/// Constructed once at process entry and injected into the gateway's
/// handlers; never read ad hoc after startup.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Product API token, sent as a bearer credential on mutating calls.
    pub token: String,
    /// Vendor account identifier, part of every request path.
    pub account: String,
    /// Policy the generated licenses are issued under.
    pub policy: String,
    /// Base URL of the vendor API, without a trailing slash.
    pub api_url: String,
}

impl UpstreamConfig {
    /// Assemble a config from explicit values.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        account: impl Into<String>,
        policy: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            account: account.into(),
            policy: policy.into(),
            api_url: api_url.into(),
        }
    }

    /// Read the config from the environment.
    ///
    /// Token, account, and policy are required; a relay without them cannot
    /// reach its vendor, so the caller should abort startup on failure
    /// rather than limp along and 500 every request.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] naming the first absent or empty
    /// required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token: required(TOKEN_VAR)?,
            account: required(ACCOUNT_VAR)?,
            policy: required(POLICY_VAR)?,
            api_url: env::var(API_URL_VAR)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
