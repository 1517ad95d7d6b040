//! # mooderia-server
//!
//! HTTP proxy for the Mooderia generation API.
//!
//! This binary provides:
//! - **`POST /api/generate`** forwarding prompt requests to the hosted
//!   generation API with a server-held credential, so browser and
//!   desktop clients never see the key
//! - **`GET /health`** for deployment checks
//! - CORS for browser clients and request tracing via `tower-http`

mod api;
mod config;
mod error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (respects RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mooderia_server=debug")),
        )
        .init();

    info!("Starting Mooderia proxy v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();
    info!(
        instance = %config.instance_name,
        addr = %config.http_addr,
        credential_configured = config.api_key.is_some(),
        "Loaded configuration"
    );

    let http_addr = config.http_addr;
    let app_state = AppState::new(config);

    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
