//! # Oracle Entities
//!
//! Endpoint configuration and the request bodies sent to collaborators.
//! Response bodies live in `shared_types::claims`.

use serde::Serialize;
use serde_json::Value;
use shared_types::{Address, EventType, UnsignedReport};
use std::fmt;
use zeroize::Zeroizing;

/// Bearer credential. Never printed.
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Where the collaborators live and how to authenticate.
#[derive(Debug, Clone)]
pub struct OracleEndpoints {
    /// Prefix the liveness query string is appended to.
    pub liveness: String,
    pub corruption: String,
    pub corruption_token: BearerToken,
    pub identifier: String,
    pub identifier_token: BearerToken,
}

/// Body posted to the corruption-validation oracle.
#[derive(Debug, Serialize)]
pub struct CorruptionValidationRequest<'a> {
    pub events: &'a Value,
}

/// Body posted to the identifier-issuance service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRequest<'a> {
    pub report: &'a UnsignedReport,
    /// Reporter's event data, forwarded verbatim.
    pub event_data: &'a Value,
    pub event_type: EventType,
    pub service_provider_address: Address,
}
