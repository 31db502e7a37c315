//! # Report Pipeline Service
//!
//! Application service implementing `ReportPipelineApi`.
//!
//! ## Stages
//!
//! ```text
//! envelope -> attestation -> debt position -> reconcile -> slash amount
//!          -> identifier -> deadline + digest -> co-signature
//! ```
//!
//! Each stage gates the next; there is no retry and no parallelism within
//! one request. Nothing is persisted, so an abandoned request leaves no
//! trace.

use crate::domain::entities::{ReportRequest, ReportResponse};
use crate::domain::envelope::validate_envelope;
use crate::domain::errors::{messages, ReportError};
use crate::domain::reconcile::{
    check_liveness_query, parse_corruption_claim, parse_liveness_claim, reconcile_corruption,
    reconcile_liveness,
};
use crate::domain::report::{
    build_unsigned_report, canonical_message, parse_identifier, proof_bundle_bytes,
    report_deadline,
};
use crate::domain::signer::DesignatedVerifier;
use crate::domain::slash::ratify_slash_amount;
use crate::ports::inbound::ReportPipelineApi;
use crate::ports::outbound::{
    AttestationVerdict, AttestationVerifier, ChainHeightSource, CorruptionOracle, DebtLedger,
    DependencyError, IdentifierContext, IdentifierIssuer, LivenessOracle, ReportRegistry,
};
use async_trait::async_trait;
use dv_telemetry::{report_span, SECURITY_TARGET};
use primitive_types::U256;
use shared_types::{Address, DebtPosition, EventType};
use std::sync::Arc;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

/// Immutable pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Payload version accepted by this deployment.
    pub version: u64,
    /// Blocks between the current height and the report deadline.
    pub report_deadline_blocks: u64,
}

/// The collaborators a pipeline drives.
#[derive(Clone)]
pub struct PipelinePorts {
    pub attestation: Arc<dyn AttestationVerifier>,
    pub ledger: Arc<dyn DebtLedger>,
    pub liveness: Arc<dyn LivenessOracle>,
    pub corruption: Arc<dyn CorruptionOracle>,
    pub identifiers: Arc<dyn IdentifierIssuer>,
    pub registry: Arc<dyn ReportRegistry>,
    pub chain: Arc<dyn ChainHeightSource>,
}

pub struct ReportPipelineService {
    ports: PipelinePorts,
    config: PipelineConfig,
    verifier: Arc<DesignatedVerifier>,
}

impl ReportPipelineService {
    pub fn new(
        ports: PipelinePorts,
        config: PipelineConfig,
        verifier: Arc<DesignatedVerifier>,
    ) -> Self {
        Self {
            ports,
            config,
            verifier,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    async fn run(&self, body: &[u8]) -> Result<ReportResponse, ReportError> {
        let request = validate_envelope(body, self.config.version)?;
        info!(
            event_type = %request.event_type,
            debtor = ?request.service_provider,
            "Report accepted for verification"
        );

        self.check_attestation(&request)?;
        let position = self.read_debt_position(request.service_provider).await?;
        let (severity, proposed) = self.reconcile(&request).await?;
        let amount = ratify_slash_amount(request.event_type, &position, severity, proposed)?;
        debug!(%amount, "Slash amount ratified");

        let unsigned = build_unsigned_report(
            request.event_type,
            request.service_provider,
            amount,
            proof_bundle_bytes(&request.self_attestation.signature),
        );
        let identifier = self
            .ports
            .identifiers
            .issue_identifier(IdentifierContext {
                report: &unsigned,
                event_data: &request.event_data,
                event_type: request.event_type,
                service_provider: request.service_provider,
            })
            .await
            .map_err(|e| {
                dependency_failure(
                    "identifier service",
                    e,
                    messages::INVALID_IDENTIFIER,
                    messages::UNABLE_TO_GET_IDENTIFIER,
                )
            })?;
        let identifier = parse_identifier(&identifier)?;

        let height = self.ports.chain.read_chain_height().await.map_err(|e| {
            warn!(error = %e, "Chain height read failed");
            ReportError::dependency(messages::UNABLE_TO_GET_BLOCK)
        })?;
        let deadline = report_deadline(height, self.config.report_deadline_blocks)?;
        let report = unsigned.finalize(identifier, deadline);

        let digest = self
            .ports
            .registry
            .compute_report_digest(&report)
            .await
            .map_err(|e| {
                error!(error = %e, "Registry digest computation failed");
                ReportError::internal(messages::UNABLE_TO_GET_REPORT_HASH)
            })?;
        let designated_verifier_signature =
            self.verifier.sign_digest(&digest, deadline).map_err(|e| {
                error!(error = %e, "Co-signing failed");
                ReportError::internal(e.to_string())
            })?;

        info!(%identifier, deadline, "Report co-signed");
        Ok(ReportResponse {
            inputs: request.inputs,
            signed_report: report,
            designated_verifier_signature,
        })
    }

    fn check_attestation(&self, request: &ReportRequest) -> Result<(), ReportError> {
        let attestation = &request.self_attestation;
        let message = canonical_message(&attestation.common_info)?;
        match self.ports.attestation.verify_attestation(
            &attestation.public_key,
            &message,
            &attestation.signature,
        ) {
            AttestationVerdict::Valid => Ok(()),
            AttestationVerdict::Invalid => {
                warn!(
                    target: SECURITY_TARGET,
                    debtor = ?request.service_provider,
                    "Self-attestation failed verification"
                );
                Err(ReportError::attestation(messages::INVALID_SELF_ATTESTATION))
            }
            AttestationVerdict::Undecodable(reason) => {
                warn!(
                    target: SECURITY_TARGET,
                    debtor = ?request.service_provider,
                    %reason,
                    "Self-attestation could not be decoded"
                );
                Err(ReportError::attestation(messages::INVALID_SELF_ATTESTATION))
            }
        }
    }

    async fn read_debt_position(&self, debtor: Address) -> Result<DebtPosition, ReportError> {
        let position = self.ports.ledger.read_debt_position(debtor).await.map_err(|e| {
            warn!(error = %e, "Debt position read failed");
            ReportError::dependency(messages::UNABLE_TO_READ_DEBT_POSITION)
        })?;
        if !position.is_active() {
            info!(debtor = ?debtor, "No active debt position");
            return Err(ReportError::state(messages::NO_DEBT_POSITION));
        }
        Ok(position)
    }

    /// Severity and proposed amount once all three parties agree.
    async fn reconcile(&self, request: &ReportRequest) -> Result<(U256, U256), ReportError> {
        let common_info = &request.self_attestation.common_info;
        match request.event_type {
            EventType::Liveness => {
                let (claim, attested) = parse_liveness_claim(&request.event_data, common_info)?;
                check_liveness_query(&claim.query)?;
                let response = self
                    .ports
                    .liveness
                    .fetch_liveness(&claim.query)
                    .await
                    .map_err(|e| {
                        dependency_failure(
                            "liveness oracle",
                            e,
                            messages::INVALID_LIVENESS_RESPONSE,
                            messages::UNABLE_TO_GET_LIVENESS,
                        )
                    })?;
                let severity = reconcile_liveness(&claim, &attested, &response)?;
                Ok((severity, claim.proposed_slashing))
            }
            EventType::Corruption => {
                let claim = parse_corruption_claim(&request.event_data, common_info)?;
                let response = self
                    .ports
                    .corruption
                    .validate_corruption_events(&claim.submitted_events)
                    .await
                    .map_err(|e| {
                        dependency_failure(
                            "corruption oracle",
                            e,
                            messages::INVALID_CORRUPTION_RESPONSE,
                            messages::UNABLE_TO_VALIDATE_CORRUPTION,
                        )
                    })?;
                let severity = reconcile_corruption(&response)?;
                Ok((severity, claim.proposed_slashing))
            }
        }
    }
}

/// Map an outbound failure to the caller-facing message for its cause.
fn dependency_failure(
    collaborator: &'static str,
    error: DependencyError,
    malformed: &'static str,
    unavailable: &'static str,
) -> ReportError {
    warn!(collaborator, error = %error, "Outbound call failed");
    match error {
        DependencyError::Malformed(_) => ReportError::dependency(malformed),
        DependencyError::Unavailable(_) => ReportError::dependency(unavailable),
    }
}

#[async_trait]
impl ReportPipelineApi for ReportPipelineService {
    async fn process_report(&self, body: &[u8]) -> Result<ReportResponse, ReportError> {
        let request_id = Uuid::new_v4();
        let span = report_span!(request_id = %request_id);
        let result = self.run(body).instrument(span.clone()).await;
        if let Err(err) = &result {
            span.in_scope(|| info!(kind = ?err.kind, message = %err.message, "Report rejected"));
        }
        result
    }

    fn designated_verifier(&self) -> Address {
        self.verifier.address()
    }
}
