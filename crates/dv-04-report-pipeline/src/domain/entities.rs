//! # Pipeline Entities
//!
//! The validated request, the kind-specific claims extracted from it, and
//! the success response.

use primitive_types::U256;
use serde::Serialize;
use serde_json::{Map, Value};
use shared_types::{
    Address, CorruptionEvent, DesignatedVerifierSignature, EventType, LivenessData,
    SlashingReport,
};

/// Reporter's self-attestation, as submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct SelfAttestation {
    /// SEC1 hex of the reporter's attestation key.
    pub public_key: String,
    /// Claim the proof is bound to.
    pub common_info: Value,
    /// Proof components, in submission order.
    pub signature: Map<String, Value>,
}

/// Request that passed envelope validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRequest {
    pub event_type: EventType,
    pub version: u64,
    pub service_provider: Address,
    pub event_data: Value,
    pub self_attestation: SelfAttestation,
    /// Fields echoed back to the caller unchanged.
    pub inputs: ReportInputs,
}

/// Liveness `eventData`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LivenessClaim {
    pub query: String,
    pub liveness_data: LivenessData,
    pub proposed_slashing: U256,
}

/// Corruption `eventData`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorruptionClaim {
    /// Typed view used for the comparison with the proof.
    pub events: Vec<CorruptionEvent>,
    /// `eventData.events` as submitted, forwarded to the oracle.
    pub submitted_events: Value,
    pub proposed_slashing: U256,
}

/// What the caller submitted, echoed in the response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInputs {
    pub rpbs_self_attestation: Value,
    pub event_type: EventType,
    pub version: Value,
    pub event_data: Value,
}

/// Successful pipeline output.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub inputs: ReportInputs,
    pub signed_report: SlashingReport,
    pub designated_verifier_signature: DesignatedVerifierSignature,
}
