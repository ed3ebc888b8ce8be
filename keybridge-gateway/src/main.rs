//! Entry point for the `keybridge-gateway` HTTP server.

use keybridge_gateway::{routes::create_router, state::AppState};
use keybridge_upstream::UpstreamConfig;
use tracing::info;

const DEFAULT_PORT: u16 = 4000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Missing vendor credentials are a startup abort, not a per-request
    // 500: a relay that cannot reach its vendor has nothing to serve.
    let config = match UpstreamConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = format!("127.0.0.1:{port}");

    let state = AppState::new(config);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "keybridge-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
