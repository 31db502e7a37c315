//! Routes and handlers.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /report` | run the pipeline, return the co-signed report |
//! | `GET /info` | deployment facts and the verifier address |
//! | `GET /health` | health check |

use crate::domain::config::{GatewayConfig, ServiceInfo};
use crate::domain::error::{messages, ApiError};
use crate::middleware::create_cors_layer;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dv_04_report_pipeline::ReportPipelineApi;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Name reported by `/health`.
pub const SERVICE_NAME: &str = "designated-verifier";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<dyn ReportPipelineApi>,
    pub info: Arc<ServiceInfo>,
}

pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors));

    Router::new()
        .route("/report", post(handle_report))
        .route("/info", get(handle_info))
        .route("/health", get(health_check))
        .fallback(|| async { ApiError::not_found() })
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware)
        .with_state(state)
}

async fn handle_report(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let status = rejection.status();
            warn!(%status, "Report body rejected");
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                messages::BODY_TOO_LARGE
            } else {
                messages::UNREADABLE_BODY
            };
            return ApiError::new(status, message).into_response();
        }
    };

    match state.pipeline.process_report(&body).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => ApiError::from(&err).into_response(),
    }
}

async fn handle_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
