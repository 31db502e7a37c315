//! # Claim Payloads
//!
//! Typed views of the data three parties assert about one event: the
//! reporter's `eventData`, the proof-bound `commonInfo`, and the oracle
//! response. Equality is field-by-field so a reviewer can see exactly what
//! must agree.

use crate::serde_helpers::{opt_textual, u64_flex};
use serde::{Deserialize, Serialize};

// =============================================================================
// LIVENESS
// =============================================================================

/// Validator availability counts for a service provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LivenessData {
    #[serde(with = "u64_flex")]
    pub num_of_validators_online: u64,
    #[serde(with = "u64_flex")]
    pub num_of_validators_offline: u64,
    #[serde(with = "u64_flex")]
    pub total_validators: u64,
}

impl LivenessData {
    /// Name of the first field that differs, if any.
    pub fn first_mismatch(&self, other: &Self) -> Option<&'static str> {
        if self.num_of_validators_online != other.num_of_validators_online {
            return Some("numOfValidatorsOnline");
        }
        if self.num_of_validators_offline != other.num_of_validators_offline {
            return Some("numOfValidatorsOffline");
        }
        if self.total_validators != other.total_validators {
            return Some("totalValidators");
        }
        None
    }

    pub fn agrees_with(&self, other: &Self) -> bool {
        self.first_mismatch(other).is_none()
    }
}

impl PartialEq for LivenessData {
    fn eq(&self, other: &Self) -> bool {
        self.agrees_with(other)
    }
}

impl Eq for LivenessData {}

// =============================================================================
// CORRUPTION
// =============================================================================

/// One alleged corruption event.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorruptionEvent {
    /// Event kind label, e.g. `double-sign`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "u64_flex")]
    pub slot: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
}

impl CorruptionEvent {
    pub fn first_mismatch(&self, other: &Self) -> Option<&'static str> {
        if self.kind != other.kind {
            return Some("type");
        }
        if self.slot != other.slot {
            return Some("slot");
        }
        if self.validator != other.validator {
            return Some("validator");
        }
        None
    }
}

impl PartialEq for CorruptionEvent {
    fn eq(&self, other: &Self) -> bool {
        self.first_mismatch(other).is_none()
    }
}

impl Eq for CorruptionEvent {}

/// Ordered comparison of two event lists.
///
/// Returns the index and field of the first disagreement. A length
/// difference is reported at the first index past the shorter list.
pub fn first_event_mismatch(
    left: &[CorruptionEvent],
    right: &[CorruptionEvent],
) -> Option<(usize, &'static str)> {
    for (index, (l, r)) in left.iter().zip(right).enumerate() {
        if let Some(field) = l.first_mismatch(r) {
            return Some((index, field));
        }
    }
    if left.len() != right.len() {
        return Some((left.len().min(right.len()), "length"));
    }
    None
}

// =============================================================================
// EXTERNAL RESPONSES
// =============================================================================

/// Body returned by the liveness oracle.
///
/// Both fields are optional on the wire; the pipeline decides what a
/// missing value means.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessOracleResponse {
    #[serde(default)]
    pub liveness_data: Option<LivenessData>,
    /// Raw textual score, parsed later at 18 decimals.
    #[serde(default, deserialize_with = "opt_textual::deserialize")]
    pub severity_score: Option<String>,
}

/// Body returned by the corruption-validation oracle.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorruptionOracleResponse {
    #[serde(default, deserialize_with = "opt_textual::deserialize")]
    pub severity_score: Option<String>,
}

/// Body returned by the identifier-issuance service.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierResponse {
    #[serde(default, deserialize_with = "opt_textual::deserialize")]
    pub next_identifier: Option<String>,
}
