//! # API Gateway Subsystem (DV-05)
//!
//! The HTTP surface of the designated-verifier middleware.
//!
//! ## Routes
//!
//! - `POST /report`: verify and co-sign a slashing report
//! - `GET /info`: deployment facts, including the verifier address
//! - `GET /health`: health check
//!
//! ## Errors
//!
//! Failures are returned as `{"error": {"msg": "..."}}`:
//!
//! | Category | Status |
//! |---|---|
//! | Malformed request | 400 |
//! | Attestation failure | 401 |
//! | State, reconciliation, economic mismatch | 422 |
//! | Dependency failure | 502 |
//! | Internal | 500 (generic message) |

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

pub use domain::config::{CorsConfig, GatewayConfig, ServiceInfo, DEFAULT_MAX_BODY_BYTES};
pub use domain::error::{status_for, ApiError};
pub use router::{build_router, AppState, SERVICE_NAME};
pub use service::ApiGatewayService;
