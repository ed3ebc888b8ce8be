//! JSON-API wire types for the vendor's responses and request payloads.
//!
//! Responses arrive as `{data, errors, meta}` documents. Only the fields
//! the relay reads are modeled; everything else is ignored.

use serde::Deserialize;
use serde_json::{json, Value};

/// A JSON-API document. `errors` is mutually exclusive with `data`/`meta`
/// in practice, but the vendor does not guarantee that, so all three are
/// optional here.
#[derive(Debug, Deserialize)]
pub(crate) struct Document<A> {
    pub data: Option<Resource<A>>,
    pub errors: Option<Vec<ApiErrorBody>>,
    pub meta: Option<ValidationMetaBody>,
}

/// A single JSON-API resource with typed attributes.
#[derive(Debug, Deserialize)]
pub(crate) struct Resource<A> {
    #[serde(default)]
    pub id: String,
    pub attributes: A,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LicenseAttributes {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MachineAttributes {
    pub fingerprint: String,
}

/// One entry of a JSON-API `errors` array.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// The detail string, falling back to the title when the vendor omits
    /// one.
    pub(crate) fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("unknown error")
    }
}

/// The `meta` block of a validate-key response. The reason field is named
/// `constant` on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct ValidationMetaBody {
    pub valid: bool,
    #[serde(default)]
    pub detail: String,
    pub constant: Option<String>,
}

/// Payload for `POST /licenses`: a new license under the configured policy.
pub(crate) fn create_license_body(key: &str, policy: &str) -> Value {
    json!({
        "data": {
            "type": "licenses",
            "attributes": { "key": key },
            "relationships": {
                "policy": {
                    "data": { "type": "policies", "id": policy }
                }
            }
        }
    })
}

/// Payload for `POST /licenses/actions/validate-key`, scoped to a machine
/// fingerprint.
pub(crate) fn validate_key_body(key: &str, fingerprint: &str) -> Value {
    json!({
        "meta": {
            "scope": { "fingerprint": fingerprint },
            "key": key
        }
    })
}

/// Payload for `POST /machines`: activate a fingerprint against a license.
pub(crate) fn create_machine_body(fingerprint: &str, license_id: &str) -> Value {
    json!({
        "data": {
            "type": "machines",
            "attributes": { "fingerprint": fingerprint },
            "relationships": {
                "license": {
                    "data": { "type": "licenses", "id": license_id }
                }
            }
        }
    })
}
