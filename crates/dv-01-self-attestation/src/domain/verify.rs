//! # Proof Verification
//!
//! Pure verification of a self-attestation over secp256k1.
//!
//! ## Equation
//!
//! For public key `Y`, message `info` and bundle
//! `(z1Hat, m1Hat, c1Hat, s1Hat, c2Hat, s2Hat)`:
//!
//! ```text
//! A = s1Hat·G + c1Hat·Y
//! B = s2Hat·G + c2Hat·z1Hat
//! e = Keccak256(A ‖ B ‖ z1Hat ‖ m1Hat ‖ info) mod n
//! valid ⇔ c1Hat + c2Hat ≡ e
//! ```
//!
//! Points are hashed in compressed SEC1 form.

use super::encoding::compressed_bytes;
use super::entities::ProofSignature;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::subtle::ConstantTimeEq;
use k256::{FieldBytes, ProjectivePoint, Scalar};
use sha3::{Digest, Keccak256};

/// Fiat-Shamir challenge binding both commitments, the bundle points and the message.
pub fn challenge(
    a: &ProjectivePoint,
    b: &ProjectivePoint,
    z1_hat: &ProjectivePoint,
    m1_hat: &ProjectivePoint,
    info: &[u8],
) -> Scalar {
    let mut hasher = Keccak256::new();
    hasher.update(compressed_bytes(a));
    hasher.update(compressed_bytes(b));
    hasher.update(compressed_bytes(z1_hat));
    hasher.update(compressed_bytes(m1_hat));
    hasher.update(info);
    let digest: FieldBytes = hasher.finalize();
    <Scalar as Reduce<k256::U256>>::reduce_bytes(&digest)
}

/// Verify a decoded bundle against a public key and message.
pub fn verify(public_key: &ProjectivePoint, info: &[u8], signature: &ProofSignature) -> bool {
    let a = ProjectivePoint::GENERATOR * signature.s1_hat + *public_key * signature.c1_hat;
    let b = ProjectivePoint::GENERATOR * signature.s2_hat + signature.z1_hat * signature.c2_hat;
    let e = challenge(&a, &b, &signature.z1_hat, &signature.m1_hat, info);
    (signature.c1_hat + signature.c2_hat).ct_eq(&e).into()
}
