//! Key generation and a prover for tests.
//!
//! The prover knows the secret `y` behind `Y = y·G` and answers the first
//! branch honestly while simulating the second.

use crate::domain::encoding::{encode_point, encode_scalar};
use crate::domain::entities::{EncodedProof, ProofSignature};
use crate::domain::verify::challenge;
use k256::elliptic_curve::Field;
use k256::{ProjectivePoint, Scalar};

/// Random attestation keypair `(y, Y)`.
pub fn generate_keypair() -> (Scalar, ProjectivePoint) {
    let secret = Scalar::random(&mut rand::thread_rng());
    (secret, ProjectivePoint::GENERATOR * secret)
}

/// Produce a decoded proof over `info`.
pub fn attest_decoded(secret: &Scalar, info: &[u8]) -> ProofSignature {
    let mut rng = rand::thread_rng();
    let z1_hat = ProjectivePoint::GENERATOR * Scalar::random(&mut rng);
    let m1_hat = ProjectivePoint::GENERATOR * Scalar::random(&mut rng);

    // Simulated branch.
    let c2_hat = Scalar::random(&mut rng);
    let s2_hat = Scalar::random(&mut rng);
    let b = ProjectivePoint::GENERATOR * s2_hat + z1_hat * c2_hat;

    // Honest branch.
    let k = Scalar::random(&mut rng);
    let a = ProjectivePoint::GENERATOR * k;

    let e = challenge(&a, &b, &z1_hat, &m1_hat, info);
    let c1_hat = e - c2_hat;
    let s1_hat = k - c1_hat * secret;

    ProofSignature {
        z1_hat,
        m1_hat,
        c1_hat,
        s1_hat,
        c2_hat,
        s2_hat,
    }
}

/// Produce a proof over `info` in transport form.
pub fn attest(secret: &Scalar, info: &[u8]) -> EncodedProof {
    encode_proof(&attest_decoded(secret, info))
}

/// Transport form of a decoded bundle, components in canonical order.
pub fn encode_proof(proof: &ProofSignature) -> EncodedProof {
    let components = [
        ("z1Hat", encode_point(&proof.z1_hat)),
        ("c1Hat", encode_scalar(&proof.c1_hat)),
        ("s1Hat", encode_scalar(&proof.s1_hat)),
        ("c2Hat", encode_scalar(&proof.c2_hat)),
        ("s2Hat", encode_scalar(&proof.s2_hat)),
        ("m1Hat", encode_point(&proof.m1_hat)),
    ];
    match EncodedProof::from_components(components) {
        Ok(proof) => proof,
        Err(e) => panic!("encoded proof is always complete: {e}"),
    }
}

/// Hex public key for a secret.
pub fn public_key_hex(secret: &Scalar) -> String {
    encode_point(&(ProjectivePoint::GENERATOR * secret))
}
