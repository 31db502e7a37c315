//! In-memory fakes of every outbound port, plus request builders backed by
//! a real self-attestation prover.
//!
//! Every fake records its calls so tests can assert which stages ran.

use crate::ports::outbound::{
    AttestationVerdict, AttestationVerifier, ChainHeightSource, CorruptionOracle, DebtLedger,
    DependencyError, IdentifierContext, IdentifierIssuer, LivenessOracle, ReportRegistry,
};
use crate::service::PipelinePorts;
use async_trait::async_trait;
use dv_01_self_attestation::test_helpers::{attest, public_key_hex};
use dv_01_self_attestation::{SelfAttestationApi, SelfAttestationService};
use k256::Scalar;
use primitive_types::U256;
use serde_json::{json, Map, Value};
use sha3::{Digest, Keccak256};
use shared_types::{
    Address, CorruptionOracleResponse, DebtPosition, Hash, IdentifierResponse,
    LivenessData, LivenessOracleResponse, SlashingReport, UnsignedReport,
};
use std::sync::{Arc, Mutex};

/// Throwaway co-signing key for tests.
pub const TEST_VERIFIER_KEY: &str =
    "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// Debtor used by the request builders.
pub const TEST_DEBTOR: &str = "0x1111111111111111111111111111111111111111";

/// Liveness query used by the request builders.
pub const TEST_QUERY: &str = "?provider=0x11&epoch=5";

/// Chain height reported by the default fake.
pub const TEST_CHAIN_HEIGHT: u64 = 1_000;

// =============================================================================
// ATTESTATION
// =============================================================================

/// The real proof primitive behind the port.
#[derive(Default)]
pub struct ProofVerifier {
    service: SelfAttestationService,
}

impl AttestationVerifier for ProofVerifier {
    fn verify_attestation(
        &self,
        public_key: &str,
        message: &[u8],
        signature: &Map<String, Value>,
    ) -> AttestationVerdict {
        AttestationVerdict::from_outcome(self.service.verify_bundle(public_key, message, signature))
    }
}

// =============================================================================
// FAKE COLLABORATORS
// =============================================================================

pub struct FakeLedger {
    pub position: Mutex<Result<DebtPosition, DependencyError>>,
    pub calls: Arc<Mutex<Vec<Address>>>,
}

#[async_trait]
impl DebtLedger for FakeLedger {
    async fn read_debt_position(&self, debtor: Address) -> Result<DebtPosition, DependencyError> {
        self.calls.lock().unwrap().push(debtor);
        self.position.lock().unwrap().clone()
    }
}

pub struct FakeLivenessOracle {
    pub response: Mutex<Result<LivenessOracleResponse, DependencyError>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LivenessOracle for FakeLivenessOracle {
    async fn fetch_liveness(&self, query: &str) -> Result<LivenessOracleResponse, DependencyError> {
        self.calls.lock().unwrap().push(query.to_owned());
        self.response.lock().unwrap().clone()
    }
}

pub struct FakeCorruptionOracle {
    pub response: Mutex<Result<CorruptionOracleResponse, DependencyError>>,
    pub calls: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl CorruptionOracle for FakeCorruptionOracle {
    async fn validate_corruption_events(
        &self,
        events: &Value,
    ) -> Result<CorruptionOracleResponse, DependencyError> {
        self.calls.lock().unwrap().push(events.clone());
        self.response.lock().unwrap().clone()
    }
}

pub struct FakeIdentifierIssuer {
    pub response: Mutex<Result<IdentifierResponse, DependencyError>>,
    pub calls: Arc<Mutex<Vec<UnsignedReport>>>,
}

#[async_trait]
impl IdentifierIssuer for FakeIdentifierIssuer {
    async fn issue_identifier(
        &self,
        context: IdentifierContext<'_>,
    ) -> Result<IdentifierResponse, DependencyError> {
        self.calls.lock().unwrap().push(context.report.clone());
        self.response.lock().unwrap().clone()
    }
}

/// Digest is Keccak-256 of the report's JSON form.
pub struct FakeRegistry {
    pub fail: Mutex<bool>,
    pub calls: Arc<Mutex<Vec<SlashingReport>>>,
}

#[async_trait]
impl ReportRegistry for FakeRegistry {
    async fn compute_report_digest(&self, report: &SlashingReport) -> Result<Hash, DependencyError> {
        self.calls.lock().unwrap().push(report.clone());
        if *self.fail.lock().unwrap() {
            return Err(DependencyError::Malformed("execution reverted".into()));
        }
        let encoded = serde_json::to_vec(report).unwrap();
        Ok(Keccak256::digest(&encoded).into())
    }
}

pub struct FakeChain {
    pub height: Mutex<Result<u64, DependencyError>>,
}

#[async_trait]
impl ChainHeightSource for FakeChain {
    async fn read_chain_height(&self) -> Result<u64, DependencyError> {
        self.height.lock().unwrap().clone()
    }
}

// =============================================================================
// FAKE PORT SET
// =============================================================================

/// One fake per port, all agreeing on a consistent default world:
/// active position (liveness 1000, corruption 500), oracle liveness
/// `8/2/10`, both severities `0.2`, identifier `42`, height 1000.
pub struct FakePorts {
    pub ledger: Arc<FakeLedger>,
    pub liveness: Arc<FakeLivenessOracle>,
    pub corruption: Arc<FakeCorruptionOracle>,
    pub identifiers: Arc<FakeIdentifierIssuer>,
    pub registry: Arc<FakeRegistry>,
    pub chain: Arc<FakeChain>,
}

pub fn active_position(liveness: U256, corruption: U256) -> DebtPosition {
    DebtPosition {
        end_timestamp: U256::from(1_900_000_000u64),
        max_slashable_amount_per_liveness: liveness,
        max_slashable_amount_per_corruption: corruption,
    }
}

pub fn liveness_data(online: u64, offline: u64, total: u64) -> LivenessData {
    LivenessData {
        num_of_validators_online: online,
        num_of_validators_offline: offline,
        total_validators: total,
    }
}

impl Default for FakePorts {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePorts {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(FakeLedger {
                position: Mutex::new(Ok(active_position(U256::from(1000), U256::from(500)))),
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            liveness: Arc::new(FakeLivenessOracle {
                response: Mutex::new(Ok(LivenessOracleResponse {
                    liveness_data: Some(liveness_data(8, 2, 10)),
                    severity_score: Some("0.2".into()),
                })),
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            corruption: Arc::new(FakeCorruptionOracle {
                response: Mutex::new(Ok(CorruptionOracleResponse {
                    severity_score: Some("0.2".into()),
                })),
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            identifiers: Arc::new(FakeIdentifierIssuer {
                response: Mutex::new(Ok(IdentifierResponse {
                    next_identifier: Some("42".into()),
                })),
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            registry: Arc::new(FakeRegistry {
                fail: Mutex::new(false),
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            chain: Arc::new(FakeChain {
                height: Mutex::new(Ok(TEST_CHAIN_HEIGHT)),
            }),
        }
    }

    /// Port set with the real proof verifier.
    pub fn ports(&self) -> PipelinePorts {
        PipelinePorts {
            attestation: Arc::new(ProofVerifier::default()),
            ledger: self.ledger.clone(),
            liveness: self.liveness.clone(),
            corruption: self.corruption.clone(),
            identifiers: self.identifiers.clone(),
            registry: self.registry.clone(),
            chain: self.chain.clone(),
        }
    }

    pub fn with_position(self, position: DebtPosition) -> Self {
        *self.ledger.position.lock().unwrap() = Ok(position);
        self
    }

    pub fn with_liveness_limit(self, limit: U256) -> Self {
        if let Ok(position) = self.ledger.position.lock().unwrap().as_mut() {
            position.max_slashable_amount_per_liveness = limit;
        }
        self
    }

    pub fn with_corruption_limit(self, limit: U256) -> Self {
        if let Ok(position) = self.ledger.position.lock().unwrap().as_mut() {
            position.max_slashable_amount_per_corruption = limit;
        }
        self
    }

    pub fn with_liveness_response(self, response: LivenessOracleResponse) -> Self {
        *self.liveness.response.lock().unwrap() = Ok(response);
        self
    }

    pub fn with_liveness_failure(self, error: DependencyError) -> Self {
        *self.liveness.response.lock().unwrap() = Err(error);
        self
    }

    pub fn with_corruption_severity(self, score: Option<&str>) -> Self {
        *self.corruption.response.lock().unwrap() = Ok(CorruptionOracleResponse {
            severity_score: score.map(str::to_owned),
        });
        self
    }

    pub fn with_corruption_failure(self, error: DependencyError) -> Self {
        *self.corruption.response.lock().unwrap() = Err(error);
        self
    }

    pub fn with_identifier(self, identifier: Option<&str>) -> Self {
        *self.identifiers.response.lock().unwrap() = Ok(IdentifierResponse {
            next_identifier: identifier.map(str::to_owned),
        });
        self
    }

    pub fn with_registry_failure(self) -> Self {
        *self.registry.fail.lock().unwrap() = true;
        self
    }

    pub fn ledger_calls(&self) -> Vec<Address> {
        self.ledger.calls.lock().unwrap().clone()
    }

    pub fn liveness_calls(&self) -> Vec<String> {
        self.liveness.calls.lock().unwrap().clone()
    }

    pub fn corruption_calls(&self) -> Vec<Value> {
        self.corruption.calls.lock().unwrap().clone()
    }

    pub fn identifier_calls(&self) -> Vec<UnsignedReport> {
        self.identifiers.calls.lock().unwrap().clone()
    }

    pub fn registry_calls(&self) -> Vec<SlashingReport> {
        self.registry.calls.lock().unwrap().clone()
    }
}

// =============================================================================
// REQUEST BUILDERS
// =============================================================================

fn attested_body(
    secret: &Scalar,
    version: u64,
    kind: &str,
    common_info: &Value,
    event_data: Value,
) -> Value {
    let message = serde_json::to_vec(common_info).unwrap();
    let proof = attest(secret, &message);
    json!({
        "eventType": kind,
        "version": version,
        "eventData": event_data,
        "rpbsSelfAttestation": {
            "publicKey": public_key_hex(secret),
            "commonInfo": common_info,
            "signature": proof.to_json()
        },
        "serviceProviderAddress": TEST_DEBTOR
    })
}

/// Corruption report whose claimed events equal `common_info.events`.
pub fn corruption_body(
    secret: &Scalar,
    version: u64,
    common_info: &Value,
    proposed: Value,
) -> Value {
    let event_data = json!({
        "events": common_info["events"].clone(),
        "proposedSlashing": proposed
    });
    attested_body(secret, version, "CORRUPTION", common_info, event_data)
}

/// Liveness report with separately chosen claimed and attested counts.
pub fn liveness_body(
    secret: &Scalar,
    version: u64,
    claimed: (u64, u64, u64),
    attested: (u64, u64, u64),
    proposed: Value,
) -> Value {
    let counts = |(online, offline, total): (u64, u64, u64)| {
        json!({
            "numOfValidatorsOnline": online,
            "numOfValidatorsOffline": offline,
            "totalValidators": total
        })
    };
    let common_info = json!({"livenessData": counts(attested)});
    let event_data = json!({
        "query": TEST_QUERY,
        "livenessData": counts(claimed),
        "proposedSlashing": proposed
    });
    attested_body(secret, version, "LIVENESS", &common_info, event_data)
}
