//! Client tests against a stub vendor server.
//!
//! Each test spins an axum server on an OS-assigned port that plays the
//! licensing vendor, then points the client at it via the config's
//! `api_url` override.

use axum::extract::Json;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};

use keybridge_core::{LicenseKey, ValidationCode};
use keybridge_upstream::{LicensingClient, UpstreamConfig, UpstreamError};

/// Spin up the stub vendor, returning its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let port = listener.local_addr().expect("stub local addr").port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://127.0.0.1:{port}")
}

fn client_for(base: &str) -> LicensingClient {
    LicensingClient::new(UpstreamConfig::new("prod-token", "acct", "policy-1", base))
}

fn well_formed_key() -> LicenseKey {
    LicenseKey::parse("aaaa-bbbb-cccc-dddd").expect("fixture key parses")
}

#[tokio::test]
async fn create_license_returns_vendor_license_and_sends_bearer_token() {
    let router = Router::new().route(
        "/v1/accounts/acct/licenses",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if auth != "Bearer prod-token" {
                return Json(json!({"errors": [{"title": "Unauthorized", "detail": "token missing"}]}));
            }
            // Echo the submitted key back, like the real vendor.
            let key = body["data"]["attributes"]["key"].clone();
            Json(json!({"data": {"type": "licenses", "id": "lic-1", "attributes": {"key": key}}}))
        }),
    );
    let base = spawn_stub(router).await;

    let license = client_for(&base)
        .create_license(&well_formed_key())
        .await
        .expect("create_license");

    assert_eq!(license.id, "lic-1");
    assert_eq!(license.key, "aaaa-bbbb-cccc-dddd");
}

#[tokio::test]
async fn create_license_joins_error_details_with_comma_space() {
    let router = Router::new().route(
        "/v1/accounts/acct/licenses",
        post(|| async {
            Json(json!({"errors": [
                {"title": "Unprocessable", "detail": "key already exists"},
                {"title": "Unprocessable", "detail": "policy is suspended"}
            ]}))
        }),
    );
    let base = spawn_stub(router).await;

    let err = client_for(&base)
        .create_license(&well_formed_key())
        .await
        .expect_err("vendor errors must fail the call");

    match err {
        UpstreamError::Rejected(msg) => {
            assert_eq!(msg, "key already exists, policy is suspended");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn validate_key_maps_meta_and_license_resource() {
    let router = Router::new().route(
        "/v1/accounts/acct/licenses/actions/validate-key",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["meta"]["scope"]["fingerprint"], "fp-1");
            Json(json!({
                "meta": {
                    "valid": false,
                    "detail": "must have at least 1 associated machine",
                    "constant": "NO_MACHINES"
                },
                "data": {"type": "licenses", "id": "lic-7", "attributes": {"key": "aaaa-bbbb-cccc-dddd"}}
            }))
        }),
    );
    let base = spawn_stub(router).await;

    let validation = client_for(&base)
        .validate_key("aaaa-bbbb-cccc-dddd", "fp-1")
        .await
        .expect("validate_key");

    assert!(!validation.outcome.valid);
    assert_eq!(validation.outcome.code, Some(ValidationCode::NoMachines));
    assert!(!validation.outcome.blocks_activation());
    let license = validation.license.expect("license resource included");
    assert_eq!(license.id, "lic-7");
}

#[tokio::test]
async fn validate_key_without_meta_is_a_decode_error() {
    let router = Router::new().route(
        "/v1/accounts/acct/licenses/actions/validate-key",
        post(|| async { Json(json!({"data": null})) }),
    );
    let base = spawn_stub(router).await;

    let err = client_for(&base)
        .validate_key("aaaa-bbbb-cccc-dddd", "fp-1")
        .await
        .expect_err("missing meta must fail");

    assert!(matches!(err, UpstreamError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn create_machine_returns_activated_machine() {
    let router = Router::new().route(
        "/v1/accounts/acct/machines",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["data"]["relationships"]["license"]["data"]["id"], "lic-7");
            let fingerprint = body["data"]["attributes"]["fingerprint"].clone();
            Json(json!({"data": {"type": "machines", "id": "mach-1", "attributes": {"fingerprint": fingerprint}}}))
        }),
    );
    let base = spawn_stub(router).await;

    let machine = client_for(&base)
        .create_machine("fp-1", "lic-7")
        .await
        .expect("create_machine");

    assert_eq!(machine.id, "mach-1");
    assert_eq!(machine.fingerprint, "fp-1");
}

#[tokio::test]
async fn unreachable_vendor_is_a_network_error() {
    // Bind then drop a listener so the port is (momentarily) closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let port = listener.local_addr().expect("probe local addr").port();
    drop(listener);

    let err = client_for(&format!("http://127.0.0.1:{port}"))
        .validate_key("aaaa-bbbb-cccc-dddd", "fp-1")
        .await
        .expect_err("closed port must fail");

    assert!(matches!(err, UpstreamError::Network(_)), "got {err:?}");
}
