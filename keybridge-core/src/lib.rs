//! Core types for the Keybridge licensing relay.
//!
//! Defines the transient domain shapes that flow between the storefront,
//! the relay, and the licensing vendor: license keys, license and machine
//! resources, and key-validation outcomes. Nothing here is persisted; the
//! vendor owns every resource.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod key;
pub mod license;
pub mod validation;

pub use error::CoreError;
pub use key::LicenseKey;
pub use license::{License, Machine};
pub use validation::{ValidationCode, ValidationOutcome};
