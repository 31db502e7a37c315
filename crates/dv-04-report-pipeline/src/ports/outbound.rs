//! # Outbound Ports (Driven Ports / SPI)
//!
//! One trait per external collaborator, so every dependency of the pipeline
//! can be replaced with a deterministic fake.

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared_types::{
    Address, CorruptionOracleResponse, DebtPosition, EventType, Hash,
    IdentifierResponse, LivenessOracleResponse, SlashingReport, UnsignedReport,
};
use thiserror::Error;

/// Failure of an outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    /// Transport failure, timeout or non-success status
    #[error("dependency unavailable: {0}")]
    Unavailable(String),

    /// Reachable but answered with something undecodable
    #[error("malformed dependency response: {0}")]
    Malformed(String),
}

/// Outcome of checking a self-attestation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttestationVerdict {
    Valid,
    /// Well-formed proof that does not verify
    Invalid,
    /// Key or proof components could not be decoded
    Undecodable(String),
}

impl AttestationVerdict {
    /// Verdict from a verification result whose error means undecodable input.
    pub fn from_outcome<E: std::fmt::Display>(outcome: Result<bool, E>) -> Self {
        match outcome {
            Ok(true) => Self::Valid,
            Ok(false) => Self::Invalid,
            Err(e) => Self::Undecodable(e.to_string()),
        }
    }
}

/// The proof primitive.
pub trait AttestationVerifier: Send + Sync {
    /// Verify `signature` over `message` under `public_key`.
    ///
    /// `signature` is the proof object exactly as submitted.
    fn verify_attestation(
        &self,
        public_key: &str,
        message: &[u8],
        signature: &Map<String, Value>,
    ) -> AttestationVerdict;
}

/// Lending contract read path.
#[async_trait]
pub trait DebtLedger: Send + Sync {
    async fn read_debt_position(&self, debtor: Address) -> Result<DebtPosition, DependencyError>;
}

#[async_trait]
pub trait LivenessOracle: Send + Sync {
    /// `query` is appended verbatim to the oracle endpoint.
    async fn fetch_liveness(&self, query: &str) -> Result<LivenessOracleResponse, DependencyError>;
}

#[async_trait]
pub trait CorruptionOracle: Send + Sync {
    /// `events` is the reporter's list as submitted.
    async fn validate_corruption_events(
        &self,
        events: &Value,
    ) -> Result<CorruptionOracleResponse, DependencyError>;
}

/// Everything the identifier issuer is told about a report.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierContext<'a> {
    pub report: &'a UnsignedReport,
    pub event_data: &'a Value,
    pub event_type: EventType,
    pub service_provider: Address,
}

/// Issues single-use replay-protection identifiers.
#[async_trait]
pub trait IdentifierIssuer: Send + Sync {
    async fn issue_identifier(
        &self,
        context: IdentifierContext<'_>,
    ) -> Result<IdentifierResponse, DependencyError>;
}

/// Registry contract: the canonical digest the verifier co-signs.
#[async_trait]
pub trait ReportRegistry: Send + Sync {
    async fn compute_report_digest(&self, report: &SlashingReport) -> Result<Hash, DependencyError>;
}

#[async_trait]
pub trait ChainHeightSource: Send + Sync {
    async fn read_chain_height(&self) -> Result<u64, DependencyError>;
}
