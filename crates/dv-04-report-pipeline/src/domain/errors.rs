//! # Report Errors
//!
//! Every pipeline stage either yields its value or a terminal `ReportError`.
//! The error carries the failure category and the caller-facing message.

use thiserror::Error;

/// Caller-facing messages.
pub mod messages {
    pub const NO_BODY: &str = "No body";
    pub const UNPARSEABLE_BODY: &str = "Error parsing body via JSON.parse";
    pub const MISSING_FIELDS: &str = "Missing fields in body";
    pub const INVALID_EVENT_TYPE: &str = "Invalid event type";
    pub const MISSING_RPBS_DATA: &str = "Missing RPBS data";
    pub const INVALID_VERSION: &str = "Invalid version";
    pub const INVALID_SERVICE_PROVIDER: &str = "Invalid service provider address";

    pub const INVALID_SELF_ATTESTATION: &str = "Invalid RPBS self attestation";

    pub const NO_DEBT_POSITION: &str = "No debt position";
    pub const UNABLE_TO_READ_DEBT_POSITION: &str = "Unable to read debt position";

    pub const INVALID_LIVENESS_EVENT_DATA: &str = "Invalid event data for liveness";
    pub const INVALID_LIVENESS_ATTESTATION_DATA: &str =
        "Invalid liveness data in RPBS attestation";
    pub const INVALID_LIVENESS_QUERY: &str = "Invalid liveness query";
    pub const UNABLE_TO_GET_LIVENESS: &str = "Unable to get liveness data";
    pub const INVALID_LIVENESS_RESPONSE: &str =
        "Invalid liveness response from service provider - try again later";
    pub const LIVENESS_MISMATCH_ENDPOINT: &str = "Invalid liveness data versus liveness endpoint";
    pub const LIVENESS_MISMATCH_ATTESTATION: &str = "Invalid liveness data versus RPBS";

    pub const INVALID_CORRUPTION_EVENT_DATA: &str = "Invalid event data for corruption";
    pub const NO_ATTESTED_EVENTS: &str = "No corruption events specified in RPBS";
    pub const EVENTS_MISMATCH: &str = "Event data not consistent with self attestation";
    pub const UNABLE_TO_VALIDATE_CORRUPTION: &str = "Unable to validate corruption events";
    pub const INVALID_CORRUPTION_RESPONSE: &str =
        "Invalid corruption response from validation service - try again later";

    pub const INVALID_SEVERITY_SCORE: &str = "Invalid severity score";

    pub const INVALID_IDENTIFIER: &str = "Invalid report identifier";
    pub const UNABLE_TO_GET_IDENTIFIER: &str = "Unable to get a report identifier";

    pub const UNABLE_TO_GET_BLOCK: &str = "Unable to get current block number";
    pub const UNABLE_TO_GET_REPORT_HASH: &str = "Unable to get report hash";
    pub const INTERNAL: &str = "Internal error";
}

/// Failure category, one per class of cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportErrorKind {
    /// Missing or unparseable body, missing fields, unknown kind, wrong version
    MalformedRequest,
    /// Undecodable proof or a proof that does not verify
    AttestationFailure,
    /// No active debt position for the named address
    StateFailure,
    /// Claim, proof and oracle disagree, or the severity is out of range
    ReconciliationFailure,
    /// An outbound call failed or timed out
    DependencyFailure,
    /// Recomputed slash amount differs from the proposed one
    EconomicMismatch,
    /// Service or contract misconfiguration
    Internal,
}

/// Terminal pipeline error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ReportError {
    pub kind: ReportErrorKind,
    pub message: String,
}

impl ReportError {
    pub fn new(kind: ReportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ReportErrorKind::MalformedRequest, message)
    }

    pub fn attestation(message: impl Into<String>) -> Self {
        Self::new(ReportErrorKind::AttestationFailure, message)
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ReportErrorKind::StateFailure, message)
    }

    pub fn reconciliation(message: impl Into<String>) -> Self {
        Self::new(ReportErrorKind::ReconciliationFailure, message)
    }

    pub fn dependency(message: impl Into<String>) -> Self {
        Self::new(ReportErrorKind::DependencyFailure, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ReportErrorKind::Internal, message)
    }

    /// Slash amount mismatch naming the expected value and its ceiling.
    pub fn slash_mismatch(expected: impl std::fmt::Display, max: impl std::fmt::Display) -> Self {
        Self::new(
            ReportErrorKind::EconomicMismatch,
            format!("Invalid slash amount. Expected {expected} based on {max} max slashing"),
        )
    }

    /// Message safe to return to the caller. Internal details are withheld.
    pub fn public_message(&self) -> &str {
        match self.kind {
            ReportErrorKind::Internal => messages::INTERNAL,
            _ => &self.message,
        }
    }
}
