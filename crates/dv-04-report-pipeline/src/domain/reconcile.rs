//! # Event Reconciler
//!
//! Three parties must agree before a penalty is authorized: the reporter's
//! `eventData`, the proof-bound `commonInfo`, and the oracle. Every
//! comparison is field by field over typed claims.

use crate::domain::entities::{CorruptionClaim, LivenessClaim};
use crate::domain::envelope::is_blank;
use crate::domain::errors::{messages, ReportError};
use crate::domain::slash::parse_severity;
use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{
    first_event_mismatch, parse_integer, CorruptionEvent, CorruptionOracleResponse, LivenessData,
    LivenessOracleResponse,
};
use tracing::debug;

/// Separator the liveness oracle needs between path and parameters.
pub const QUERY_SEPARATOR: char = '?';

// =============================================================================
// FIELD EXTRACTION
// =============================================================================

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !is_blank(v))
}

fn typed<T: DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
    field(value, key).and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// `proposedSlashing` as an integer or a decimal-integer string.
///
/// JSON numbers keep their source text, so wei-scale literals parse exactly.
pub fn parse_proposed_slashing(value: &Value) -> Option<U256> {
    match value {
        Value::Number(n) => parse_integer(&n.to_string()).ok(),
        Value::String(s) => parse_integer(s.trim()).ok(),
        _ => None,
    }
}

// =============================================================================
// LIVENESS
// =============================================================================

/// Extract the liveness claim and the proof-bound liveness data.
pub fn parse_liveness_claim(
    event_data: &Value,
    common_info: &Value,
) -> Result<(LivenessClaim, LivenessData), ReportError> {
    let invalid = || ReportError::malformed(messages::INVALID_LIVENESS_EVENT_DATA);

    let query = field(event_data, "query")
        .and_then(Value::as_str)
        .ok_or_else(invalid)?;
    let liveness_data: LivenessData = typed(event_data, "livenessData").ok_or_else(invalid)?;
    let proposed_slashing = field(event_data, "proposedSlashing")
        .and_then(parse_proposed_slashing)
        .ok_or_else(invalid)?;

    let attested: LivenessData = typed(common_info, "livenessData")
        .ok_or_else(|| ReportError::malformed(messages::INVALID_LIVENESS_ATTESTATION_DATA))?;

    Ok((
        LivenessClaim {
            query: query.to_owned(),
            liveness_data,
            proposed_slashing,
        },
        attested,
    ))
}

/// The oracle URL is built by appending the query verbatim.
pub fn check_liveness_query(query: &str) -> Result<(), ReportError> {
    if query.is_empty() || !query.contains(QUERY_SEPARATOR) {
        return Err(ReportError::reconciliation(messages::INVALID_LIVENESS_QUERY));
    }
    Ok(())
}

/// Check the oracle response against the claim and the proof.
///
/// Returns the severity in WAD units.
pub fn reconcile_liveness(
    claim: &LivenessClaim,
    attested: &LivenessData,
    response: &LivenessOracleResponse,
) -> Result<U256, ReportError> {
    let (Some(observed), Some(score)) = (&response.liveness_data, &response.severity_score) else {
        return Err(ReportError::dependency(messages::INVALID_LIVENESS_RESPONSE));
    };

    let severity = parse_severity(score)?;

    if let Some(field) = observed.first_mismatch(&claim.liveness_data) {
        debug!(field, "Claimed liveness differs from oracle");
        return Err(ReportError::reconciliation(
            messages::LIVENESS_MISMATCH_ENDPOINT,
        ));
    }
    if let Some(field) = observed.first_mismatch(attested) {
        debug!(field, "Attested liveness differs from oracle");
        return Err(ReportError::reconciliation(
            messages::LIVENESS_MISMATCH_ATTESTATION,
        ));
    }
    Ok(severity)
}

// =============================================================================
// CORRUPTION
// =============================================================================

/// Extract the corruption claim and require the proof to bind the same list.
pub fn parse_corruption_claim(
    event_data: &Value,
    common_info: &Value,
) -> Result<CorruptionClaim, ReportError> {
    let invalid = || ReportError::malformed(messages::INVALID_CORRUPTION_EVENT_DATA);

    let submitted_events = field(event_data, "events").ok_or_else(invalid)?;
    let events: Vec<CorruptionEvent> =
        serde_json::from_value(submitted_events.clone()).map_err(|_| invalid())?;
    if events.is_empty() {
        return Err(invalid());
    }
    let proposed_slashing = field(event_data, "proposedSlashing")
        .and_then(parse_proposed_slashing)
        .ok_or_else(invalid)?;

    let attested_value = field(common_info, "events")
        .ok_or_else(|| ReportError::malformed(messages::NO_ATTESTED_EVENTS))?;
    let mismatch = || ReportError::reconciliation(messages::EVENTS_MISMATCH);
    let attested: Vec<CorruptionEvent> =
        serde_json::from_value(attested_value.clone()).map_err(|_| mismatch())?;

    if let Some((index, field)) = first_event_mismatch(&events, &attested) {
        debug!(index, field, "Claimed events differ from attested events");
        return Err(mismatch());
    }

    Ok(CorruptionClaim {
        events,
        submitted_events: submitted_events.clone(),
        proposed_slashing,
    })
}

/// Severity from the corruption oracle, in WAD units.
pub fn reconcile_corruption(response: &CorruptionOracleResponse) -> Result<U256, ReportError> {
    let score = response
        .severity_score
        .as_deref()
        .ok_or_else(|| ReportError::reconciliation(messages::INVALID_SEVERITY_SCORE))?;
    parse_severity(score)
}
