//! Axum route handlers for the Keybridge relay API.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use keybridge_core::LicenseKey;

use crate::{error::GatewayError, state::AppState};

// ── Request types ─────────────────────────────────────────────────────────────

/// Body of `POST /generate`. Fields are optional so the handler owns the
/// missing-field response instead of the form extractor.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub order: Option<String>,
}

/// Body of `POST /activate` and `POST /validate`.
#[derive(Debug, Deserialize)]
pub struct MachineKeyForm {
    pub fingerprint: Option<String>,
    pub key: Option<String>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given shared state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/activate", post(activate))
        .route("/validate", post(validate))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /generate` — mint a license key for a completed order.
///
/// Generates a fresh grouped-hex key, creates a license for it under the
/// configured policy, and returns the key the vendor echoed back as
/// plaintext. Reached after checkout, so the order is run through the
/// order-verification capability first.
///
/// # Errors
/// Returns [`GatewayError::MissingField`] (400) if `order` is absent or
/// empty, or [`GatewayError::Upstream`] (500) if the vendor rejects the
/// creation.
pub async fn generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<impl IntoResponse, GatewayError> {
    let order = require(form.order.as_deref(), "Order ID", "generating new licenses")?;
    state.verifier.verify(order).await?;

    let key = LicenseKey::generate();
    let license = state.client.create_license(&key).await?;

    tracing::info!(order = %order, "license generated");
    Ok((StatusCode::OK, license.key))
}

/// `POST /activate` — activate one machine for a license key.
///
/// Validates the key within the fingerprint's scope first. An invalid
/// result is allowed through when the reason is only that the license has
/// no machine activations yet (or is not node-locked); any other reason is
/// a hard 422. Otherwise the fingerprint is registered as a machine of the
/// validated license.
///
/// # Errors
/// Returns [`GatewayError::MissingField`] (400) for an absent fingerprint
/// or key (fingerprint checked first), [`GatewayError::LicenseInvalid`]
/// (422) on hard validation failure, or [`GatewayError::Upstream`] (500)
/// on vendor errors during either call.
pub async fn activate(
    State(state): State<AppState>,
    Form(form): Form<MachineKeyForm>,
) -> Result<impl IntoResponse, GatewayError> {
    let fingerprint = require(
        form.fingerprint.as_deref(),
        "Machine fingerprint",
        "license activation",
    )?;
    let key = require(form.key.as_deref(), "License key", "license activation")?;

    let validation = state.client.validate_key(key, fingerprint).await?;
    if validation.outcome.blocks_activation() {
        return Err(GatewayError::LicenseInvalid(validation.outcome.detail));
    }

    // The validate-key response includes the license resource; without it
    // there is nothing to attach the machine to.
    let license = validation.license.ok_or_else(|| {
        GatewayError::Upstream(keybridge_upstream::UpstreamError::Decode(
            "validation returned no license resource".to_owned(),
        ))
    })?;

    let machine = state.client.create_machine(fingerprint, &license.id).await?;

    tracing::info!(fingerprint = %machine.fingerprint, "machine activated");
    Ok((
        StatusCode::OK,
        format!("Machine {} activated!", machine.fingerprint),
    ))
}

/// `POST /validate` — check a license key within a machine's scope.
///
/// # Errors
/// Returns [`GatewayError::MissingField`] (400) for an absent fingerprint
/// or key (fingerprint checked first), [`GatewayError::LicenseInvalid`]
/// (422) when the vendor reports the key invalid, or
/// [`GatewayError::Upstream`] (500) on vendor errors.
pub async fn validate(
    State(state): State<AppState>,
    Form(form): Form<MachineKeyForm>,
) -> Result<impl IntoResponse, GatewayError> {
    let fingerprint = require(
        form.fingerprint.as_deref(),
        "Machine fingerprint",
        "license validation",
    )?;
    let key = require(form.key.as_deref(), "License key", "license validation")?;

    let validation = state.client.validate_key(key, fingerprint).await?;
    if !validation.outcome.valid {
        return Err(GatewayError::LicenseInvalid(validation.outcome.detail));
    }

    Ok((
        StatusCode::OK,
        format!("The license {}", validation.outcome.detail),
    ))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Treat an absent or empty field as missing, mirroring the storefront
/// contract's falsy check.
fn require<'a>(
    value: Option<&'a str>,
    field: &'static str,
    action: &'static str,
) -> Result<&'a str, GatewayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GatewayError::MissingField { field, action }),
    }
}
