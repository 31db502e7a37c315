//! # Designated Verifier Node Runtime
//!
//! The entry point for the designated-verifier middleware.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (from `DV_*` environment variables)
//! 2. Load and validate configuration; exit on the first missing key
//! 3. Build the chain and oracle clients and wire the report pipeline
//! 4. Bind the HTTP listener and serve until Ctrl-C
//!
//! In-flight reports complete before the process exits. Nothing is
//! persisted, so an interrupted report is simply resubmitted.

use anyhow::{Context, Result};
use dv_telemetry::{init_logging, TelemetryConfig};
use node_runtime::{MiddlewareConfig, MiddlewareContainer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Designated Verifier v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = MiddlewareConfig::from_env().context("Failed to load configuration")?;
    let container = MiddlewareContainer::new(config).context("Failed to initialize subsystems")?;

    let gateway = container.api_gateway();
    let listener = gateway
        .bind()
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}",
                container.config.gateway_config().http_addr()
            )
        })?;

    gateway
        .serve(listener, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Node shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
