//! API error envelope.
//!
//! Every failure leaves the service as `{"error": {"msg": "..."}}` with a
//! non-2xx status chosen by failure category.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dv_04_report_pipeline::{ReportError, ReportErrorKind};
use serde::Serialize;

/// Fixed messages produced by the gateway itself.
pub mod messages {
    pub const NOT_FOUND: &str = "Not found";
    pub const BODY_TOO_LARGE: &str = "Body too large";
    pub const UNREADABLE_BODY: &str = "Unable to read body";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorMsg<'a>,
}

#[derive(Serialize)]
struct ErrorMsg<'a> {
    msg: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, messages::NOT_FOUND)
    }

    /// Caller-facing error for a pipeline failure. Internal details are withheld.
    pub fn from_report(error: &ReportError) -> Self {
        Self::new(status_for(error.kind), error.public_message())
    }
}

/// HTTP status per failure category.
pub fn status_for(kind: ReportErrorKind) -> StatusCode {
    match kind {
        ReportErrorKind::MalformedRequest => StatusCode::BAD_REQUEST,
        ReportErrorKind::AttestationFailure => StatusCode::UNAUTHORIZED,
        ReportErrorKind::StateFailure
        | ReportErrorKind::ReconciliationFailure
        | ReportErrorKind::EconomicMismatch => StatusCode::UNPROCESSABLE_ENTITY,
        ReportErrorKind::DependencyFailure => StatusCode::BAD_GATEWAY,
        ReportErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&ReportError> for ApiError {
    fn from(error: &ReportError) -> Self {
        Self::from_report(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorMsg {
                msg: &self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
