//! Client for the licensing vendor's JSON-API-flavored HTTP API.
//!
//! Wraps the three vendor operations the relay needs: create a license,
//! validate a key within a fingerprint scope, and create a machine
//! activation. All calls go through one shared request helper so that
//! vendor `errors` arrays map to [`UpstreamError`] in exactly one place.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod config;
pub mod error;
pub mod verify;
mod wire;

pub use client::{KeyValidation, LicensingClient};
pub use config::{ConfigError, UpstreamConfig};
pub use error::UpstreamError;
pub use verify::{AcceptAllOrders, OrderVerifier};
