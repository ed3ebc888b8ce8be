//! The vendor API client.
//!
//! Every call is a single POST of a JSON-API document; [`LicensingClient::post`]
//! is the one place transport failures and vendor `errors` arrays become
//! [`UpstreamError`]s. Mutating calls carry the product token as a bearer
//! credential; key validation is unauthenticated.

use keybridge_core::{License, LicenseKey, Machine, ValidationCode, ValidationOutcome};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::wire::{
    create_license_body, create_machine_body, validate_key_body, ApiErrorBody, Document,
    LicenseAttributes, MachineAttributes,
};

const VND_API: &str = "application/vnd.api+json";

/// Result of a key-validation call: the outcome plus the license resource
/// when the vendor includes one (activation needs its id).
#[derive(Debug, Clone)]
pub struct KeyValidation {
    pub outcome: ValidationOutcome,
    pub license: Option<License>,
}

/// HTTP client for the licensing vendor.
#[derive(Debug, Clone)]
pub struct LicensingClient {
    config: UpstreamConfig,
    http: reqwest::Client,
}

impl LicensingClient {
    /// Create a client over the given configuration.
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config, http: reqwest::Client::new() }
    }

    /// Create a new license for `key` under the configured policy.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Rejected`] when the vendor reports errors,
    /// [`UpstreamError::Network`] on transport failure, or
    /// [`UpstreamError::Decode`] when the response carries no license.
    pub async fn create_license(&self, key: &LicenseKey) -> Result<License, UpstreamError> {
        debug!(key = %key, "creating license");
        let body = create_license_body(key.as_str(), &self.config.policy);
        let doc: Document<LicenseAttributes> = self.post("licenses", &body, true).await?;
        let data = doc
            .data
            .ok_or_else(|| UpstreamError::Decode("license creation returned no data".to_owned()))?;
        Ok(License::new(data.id, data.attributes.key))
    }

    /// Validate `key` within the scope of `fingerprint`.
    ///
    /// The inbound key is passed through verbatim; only keys this relay
    /// generates are held to the grouped-hex format.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Rejected`], [`UpstreamError::Network`], or
    /// [`UpstreamError::Decode`] when the response has no `meta` block.
    pub async fn validate_key(
        &self,
        key: &str,
        fingerprint: &str,
    ) -> Result<KeyValidation, UpstreamError> {
        debug!(fingerprint = %fingerprint, "validating key");
        let body = validate_key_body(key, fingerprint);
        let doc: Document<LicenseAttributes> =
            self.post("licenses/actions/validate-key", &body, false).await?;
        let meta = doc
            .meta
            .ok_or_else(|| UpstreamError::Decode("validation returned no meta".to_owned()))?;
        let outcome = ValidationOutcome::new(
            meta.valid,
            meta.constant.map(ValidationCode::from),
            meta.detail,
        );
        let license = doc.data.map(|d| License::new(d.id, d.attributes.key));
        Ok(KeyValidation { outcome, license })
    }

    /// Activate `fingerprint` as a machine of the license `license_id`.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Rejected`], [`UpstreamError::Network`], or
    /// [`UpstreamError::Decode`] when the response carries no machine.
    pub async fn create_machine(
        &self,
        fingerprint: &str,
        license_id: &str,
    ) -> Result<Machine, UpstreamError> {
        debug!(fingerprint = %fingerprint, license_id = %license_id, "creating machine");
        let body = create_machine_body(fingerprint, license_id);
        let doc: Document<MachineAttributes> = self.post("machines", &body, true).await?;
        let data = doc
            .data
            .ok_or_else(|| UpstreamError::Decode("machine creation returned no data".to_owned()))?;
        Ok(Machine::new(data.id, data.attributes.fingerprint))
    }

    /// POST a document to `{api_url}/v1/accounts/{account}/{path}` and map
    /// the response.
    ///
    /// The vendor signals failure through the `errors` array rather than
    /// the status code alone, so the body is decoded regardless of status
    /// and `errors` wins when present.
    async fn post<A: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Document<A>, UpstreamError> {
        let url = format!(
            "{}/v1/accounts/{}/{path}",
            self.config.api_url, self.config.account
        );

        let mut request = self
            .http
            .post(&url)
            .header("Content-Type", VND_API)
            .header("Accept", VND_API)
            .json(body);
        if authenticated {
            request = request.bearer_auth(&self.config.token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let doc: Document<A> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if let Some(errors) = doc.errors {
            let joined = errors
                .iter()
                .map(ApiErrorBody::message)
                .collect::<Vec<_>>()
                .join(", ");
            debug!(path = %path, errors = %joined, "vendor rejected request");
            return Err(UpstreamError::Rejected(joined));
        }

        Ok(doc)
    }
}
