//! HTTP gateway for the Keybridge licensing relay.
//!
//! Exposes the three storefront/product-facing endpoints (`/generate`,
//! `/activate`, `/validate`) and translates between form-encoded inbound
//! requests and the vendor's JSON-API contract. Every handler is stateless;
//! the only shared state is the immutable vendor client.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
pub mod state;
