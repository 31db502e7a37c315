//! # Envelope Validation
//!
//! Shape checks on the raw request body. Pure: no I/O, no cryptography.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. Body present
//! 2. Body parses as JSON
//! 3. Required top-level fields present
//! 4. `eventType` is a known kind
//! 5. Self-attestation carries `signature`, `publicKey` and `commonInfo`
//! 6. `version` equals the configured version
//! 7. `serviceProviderAddress` is a 20-byte hex address

use crate::domain::entities::{ReportInputs, ReportRequest, SelfAttestation};
use crate::domain::errors::{messages, ReportError};
use serde_json::{Map, Value};
use shared_types::{parse_address, parse_integer, EventType};

/// Top-level keys every report must carry.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "eventType",
    "version",
    "eventData",
    "rpbsSelfAttestation",
    "serviceProviderAddress",
];

/// Validate a raw body against the configured payload version.
pub fn validate_envelope(body: &[u8], configured_version: u64) -> Result<ReportRequest, ReportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ReportError::malformed(messages::NO_BODY));
    }

    let parsed: Value = serde_json::from_slice(body)
        .map_err(|_| ReportError::malformed(messages::UNPARSEABLE_BODY))?;
    let Value::Object(mut fields) = parsed else {
        return Err(ReportError::malformed(messages::MISSING_FIELDS));
    };

    if REQUIRED_FIELDS
        .iter()
        .any(|key| fields.get(*key).map_or(true, is_blank))
    {
        return Err(ReportError::malformed(messages::MISSING_FIELDS));
    }

    let event_type = fields
        .get("eventType")
        .and_then(Value::as_str)
        .and_then(EventType::parse)
        .ok_or_else(|| ReportError::malformed(messages::INVALID_EVENT_TYPE))?;

    let rpbs = fields.remove("rpbsSelfAttestation").unwrap_or_default();
    let self_attestation = self_attestation(&rpbs)?;

    let version_value = fields.remove("version").unwrap_or_default();
    let version = parse_version(&version_value)
        .filter(|v| *v == configured_version)
        .ok_or_else(|| ReportError::malformed(messages::INVALID_VERSION))?;

    let service_provider = fields
        .get("serviceProviderAddress")
        .and_then(Value::as_str)
        .and_then(parse_address)
        .ok_or_else(|| ReportError::malformed(messages::INVALID_SERVICE_PROVIDER))?;

    let event_data = fields.remove("eventData").unwrap_or_default();

    Ok(ReportRequest {
        event_type,
        version,
        service_provider,
        event_data: event_data.clone(),
        self_attestation,
        inputs: ReportInputs {
            rpbs_self_attestation: rpbs,
            event_type,
            version: version_value,
            event_data,
        },
    })
}

/// Absent-equivalent values: `null`, `""` and `false`.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn self_attestation(rpbs: &Value) -> Result<SelfAttestation, ReportError> {
    let missing = || ReportError::malformed(messages::MISSING_RPBS_DATA);

    let signature: &Map<String, Value> = rpbs
        .get("signature")
        .and_then(Value::as_object)
        .ok_or_else(missing)?;
    let public_key = rpbs
        .get("publicKey")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(missing)?;
    let common_info = rpbs
        .get("commonInfo")
        .filter(|c| !is_blank(c))
        .ok_or_else(missing)?;

    Ok(SelfAttestation {
        public_key: public_key.to_owned(),
        common_info: common_info.clone(),
        signature: signature.clone(),
    })
}

/// Integer or integer string. Floats, negatives and junk are `None`.
fn parse_version(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_integer(s.trim())
            .ok()
            .filter(|v| v.bits() <= 64)
            .map(|v| v.low_u64()),
        _ => None,
    }
}
