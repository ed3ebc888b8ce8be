//! Transient license and machine shapes.
//!
//! Both resources are owned by the licensing vendor; the relay only holds
//! them for the lifetime of a single request.

use serde::{Deserialize, Serialize};

/// A license resource as returned by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct License {
    /// Vendor-assigned opaque identifier.
    pub id: String,
    /// The human-enterable key string.
    pub key: String,
}

impl License {
    #[must_use]
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self { id: id.into(), key: key.into() }
    }
}

/// A machine activation resource as returned by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Machine {
    /// Vendor-assigned opaque identifier.
    pub id: String,
    /// Opaque string identifying the installed machine instance.
    pub fingerprint: String,
}

impl Machine {
    #[must_use]
    pub fn new(id: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self { id: id.into(), fingerprint: fingerprint.into() }
    }
}
