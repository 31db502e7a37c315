//! # DV Telemetry
//!
//! Structured logging for the designated-verifier middleware.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dv_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DV_SERVICE_NAME` | `designated-verifier` | Service name in the startup log |
//! | `DV_LOG_LEVEL` | `RUST_LOG`, then `info` | Log level filter |
//! | `DV_JSON_LOGS` | `true` in containers | JSON output |
//!
//! Security-relevant events (rejected attestations) are logged under the
//! [`SECURITY_TARGET`] target so they can be routed separately.

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_logging;

use thiserror::Error;

/// Log target for security-relevant rejections.
pub const SECURITY_TARGET: &str = "security";

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or installation failed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The log filter directive could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Span for one report pipeline run.
///
/// # Example
///
/// ```rust,ignore
/// let span = dv_telemetry::report_span!(request_id = %id, event_type = "LIVENESS");
/// ```
#[macro_export]
macro_rules! report_span {
    ($($field:tt)*) => {
        tracing::info_span!("report", $($field)*)
    };
}
