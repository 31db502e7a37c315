//! Self-attestation verification backed by dv-01.

use dv_01_self_attestation::{SelfAttestationApi, SelfAttestationService};
use dv_04_report_pipeline::{AttestationVerdict, AttestationVerifier};
use serde_json::{Map, Value};

/// Runtime implementation of `AttestationVerifier`.
#[derive(Default)]
pub struct SelfAttestationAdapter {
    service: SelfAttestationService,
}

impl AttestationVerifier for SelfAttestationAdapter {
    fn verify_attestation(
        &self,
        public_key: &str,
        message: &[u8],
        signature: &Map<String, Value>,
    ) -> AttestationVerdict {
        AttestationVerdict::from_outcome(self.service.verify_bundle(public_key, message, signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_01_self_attestation::test_helpers::{attest, generate_keypair, public_key_hex};
    use dv_01_self_attestation::EncodedProof;

    fn proof_map(proof: &EncodedProof) -> Map<String, Value> {
        match proof.to_json() {
            Value::Object(map) => map,
            other => panic!("proof is not an object: {other}"),
        }
    }

    /// Test: A proof produced by the prover verifies through the port.
    #[test]
    fn test_valid_attestation() {
        let (secret, _) = generate_keypair();
        let proof = attest(&secret, b"{\"events\":[]}");
        let adapter = SelfAttestationAdapter::default();

        let verdict = adapter.verify_attestation(
            &public_key_hex(&secret),
            b"{\"events\":[]}",
            &proof_map(&proof),
        );
        assert_eq!(verdict, AttestationVerdict::Valid);
    }

    #[test]
    fn test_wrong_message_is_invalid() {
        let (secret, _) = generate_keypair();
        let proof = attest(&secret, b"original");
        let adapter = SelfAttestationAdapter::default();

        let verdict =
            adapter.verify_attestation(&public_key_hex(&secret), b"tampered", &proof_map(&proof));
        assert_eq!(verdict, AttestationVerdict::Invalid);
    }

    /// Test: Missing components are reported as undecodable, not invalid.
    #[test]
    fn test_missing_component_is_undecodable() {
        let (secret, _) = generate_keypair();
        let mut map = proof_map(&attest(&secret, b"info"));
        map.remove("m1Hat");
        let adapter = SelfAttestationAdapter::default();

        let verdict = adapter.verify_attestation(&public_key_hex(&secret), b"info", &map);
        assert!(matches!(verdict, AttestationVerdict::Undecodable(_)));
    }
}
