//! # Self-Attestation Service
//!
//! Application service implementing `SelfAttestationApi` by delegating to
//! the domain layer.

use crate::domain::encoding::decode_point;
use crate::domain::entities::{EncodedProof, ProofSignature};
use crate::domain::errors::AttestationError;
use crate::domain::verify;
use crate::ports::inbound::SelfAttestationApi;
use k256::ProjectivePoint;
use tracing::debug;

/// Stateless verifier; cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct SelfAttestationService;

impl SelfAttestationService {
    pub fn new() -> Self {
        Self
    }
}

impl SelfAttestationApi for SelfAttestationService {
    fn decode_public_key(&self, encoded: &str) -> Result<ProjectivePoint, AttestationError> {
        decode_point("publicKey", encoded)
    }

    fn decode_proof(&self, proof: &EncodedProof) -> Result<ProofSignature, AttestationError> {
        proof.decode()
    }

    fn verify(
        &self,
        public_key: &ProjectivePoint,
        message: &[u8],
        signature: &ProofSignature,
    ) -> bool {
        let valid = verify::verify(public_key, message, signature);
        debug!(valid, message_len = message.len(), "Self-attestation checked");
        valid
    }
}
