//! License key generation and format validation.
//!
//! Keys are short enough to enter by hand: 8 random bytes rendered as
//! lowercase hex and split into 4 groups of 4 characters, e.g.
//! `1f2e-88ab-03cd-9b10`. The vendor treats the key as an opaque
//! credential; only the relay cares about the shape.

use std::fmt;
use std::fmt::Write as _;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Number of hyphen-separated groups in a key.
const GROUP_COUNT: usize = 4;

/// Hex characters per group.
const GROUP_LEN: usize = 4;

/// A well-formed license key in grouped-hex format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseKey(String);

impl LicenseKey {
    /// Generate a fresh random key from 8 bytes of OS entropy.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; GROUP_COUNT * GROUP_LEN / 2];
        rand::thread_rng().fill_bytes(&mut bytes);

        let mut hex = String::with_capacity(bytes.len() * 2);
        for b in bytes {
            let _ = write!(hex, "{b:02x}");
        }

        let grouped = hex
            .as_bytes()
            .chunks(GROUP_LEN)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-");

        Self(grouped)
    }

    /// Parse a key string, accepting only the grouped-hex format.
    ///
    /// # Errors
    /// Returns [`CoreError::MalformedKey`] if the string is not 4 groups of
    /// 4 lowercase hex characters separated by hyphens.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let groups: Vec<&str> = s.split('-').collect();
        if groups.len() != GROUP_COUNT {
            return Err(CoreError::MalformedKey {
                key: s.to_owned(),
                reason: format!("expected {GROUP_COUNT} groups, found {}", groups.len()),
            });
        }
        for group in &groups {
            if group.len() != GROUP_LEN {
                return Err(CoreError::MalformedKey {
                    key: s.to_owned(),
                    reason: format!("expected groups of {GROUP_LEN} characters"),
                });
            }
            if !group.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
                return Err(CoreError::MalformedKey {
                    key: s.to_owned(),
                    reason: "groups must be lowercase hex".to_owned(),
                });
            }
        }
        Ok(Self(s.to_owned()))
    }

    /// Borrow the key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
