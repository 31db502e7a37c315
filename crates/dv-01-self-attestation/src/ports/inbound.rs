//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{EncodedProof, ProofSignature};
use crate::domain::errors::AttestationError;
use k256::ProjectivePoint;
use serde_json::{Map, Value};

/// Self-attestation verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SelfAttestationApi: Send + Sync {
    /// Decode the reporter's public key from SEC1 hex.
    fn decode_public_key(&self, encoded: &str) -> Result<ProjectivePoint, AttestationError>;

    /// Decode every component of a proof bundle.
    fn decode_proof(&self, proof: &EncodedProof) -> Result<ProofSignature, AttestationError>;

    /// Verify a decoded bundle. Never errors: an invalid proof is `false`.
    fn verify(&self, public_key: &ProjectivePoint, message: &[u8], signature: &ProofSignature)
        -> bool;

    /// Decode then verify.
    ///
    /// Decoding failures are errors; a well-formed but wrong proof is `Ok(false)`.
    fn verify_encoded(
        &self,
        public_key: &str,
        message: &[u8],
        proof: &EncodedProof,
    ) -> Result<bool, AttestationError> {
        let key = self.decode_public_key(public_key)?;
        let signature = self.decode_proof(proof)?;
        Ok(self.verify(&key, message, &signature))
    }

    /// Parse a bundle object as submitted, then decode and verify.
    fn verify_bundle(
        &self,
        public_key: &str,
        message: &[u8],
        bundle: &Map<String, Value>,
    ) -> Result<bool, AttestationError> {
        let proof = EncodedProof::from_map(bundle)?;
        self.verify_encoded(public_key, message, &proof)
    }
}
