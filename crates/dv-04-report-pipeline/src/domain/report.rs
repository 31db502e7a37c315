//! # Report Assembly
//!
//! Builds the on-chain `SlashingReport` from a ratified claim.

use crate::domain::errors::{messages, ReportError};
use primitive_types::U256;
use serde_json::{Map, Value};
use shared_types::{parse_integer, Address, EventType, IdentifierResponse, UnsignedReport};

/// Bytes the proof was computed over: the exact JSON serialization of
/// `commonInfo`, key order preserved.
pub fn canonical_message(common_info: &Value) -> Result<Vec<u8>, ReportError> {
    serde_json::to_vec(common_info).map_err(|e| ReportError::internal(e.to_string()))
}

/// Proof bundle as carried in the report: component values joined by `:`
/// in submission order, UTF-8 encoded.
pub fn proof_bundle_bytes(signature: &Map<String, Value>) -> Vec<u8> {
    signature
        .values()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(":")
        .into_bytes()
}

pub fn build_unsigned_report(
    event_type: EventType,
    debtor: Address,
    amount: U256,
    proof_bundle: Vec<u8>,
) -> UnsignedReport {
    UnsignedReport {
        slash_type: event_type.slash_type(),
        debtor,
        amount,
        signature: proof_bundle,
    }
}

/// Identifier from the issuer's response. `"0"` is a valid identifier.
pub fn parse_identifier(response: &IdentifierResponse) -> Result<U256, ReportError> {
    response
        .next_identifier
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| parse_integer(s).ok())
        .ok_or_else(|| ReportError::dependency(messages::INVALID_IDENTIFIER))
}

/// Block after which the co-signature is no longer honoured.
pub fn report_deadline(current_height: u64, window: u64) -> Result<u64, ReportError> {
    current_height
        .checked_add(window)
        .ok_or_else(|| ReportError::internal("report deadline overflows u64"))
}
