//! # Designated Verifier Key
//!
//! The process-lifetime secp256k1 key that co-signs ratified reports.
//!
//! Signatures are over the raw 32-byte digest returned by the registry
//! (no message prefix), low-S, with `v = 27 + recoveryId`.

use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};
use shared_types::serde_helpers::strip_hex_prefix;
use shared_types::{Address, DesignatedVerifierSignature, Hash};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// Key loading and signing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("verifier key must be 32 bytes of hex")]
    InvalidKeyEncoding,

    #[error("verifier key is not a valid secp256k1 secret")]
    InvalidKey,

    #[error("signing failed: {0}")]
    Signing(String),
}

pub struct DesignatedVerifier {
    signing_key: SigningKey,
    address: Address,
}

impl DesignatedVerifier {
    /// Load from hex, `0x` prefix optional.
    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let digits = strip_hex_prefix(secret.trim());
        if digits.len() != 64 {
            return Err(SignerError::InvalidKeyEncoding);
        }
        let bytes = Zeroizing::new(hex::decode(digits).map_err(|_| SignerError::InvalidKeyEncoding)?);
        let signing_key = SigningKey::from_slice(&bytes).map_err(|_| SignerError::InvalidKey)?;
        Ok(Self::from_signing_key(signing_key))
    }

    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = address_of(&signing_key);
        Self {
            signing_key,
            address,
        }
    }

    /// Ethereum address of the key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Co-sign `digest` for a report expiring at `deadline`.
    pub fn sign_digest(
        &self,
        digest: &Hash,
        deadline: u64,
    ) -> Result<DesignatedVerifierSignature, SignerError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| SignerError::Signing(e.to_string()))?;

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(DesignatedVerifierSignature {
            deadline,
            v: 27 + recovery_id.to_byte(),
            r,
            s,
        })
    }
}

impl fmt::Debug for DesignatedVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignatedVerifier")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Last 20 bytes of Keccak-256 over the uncompressed public key, sans `0x04`.
fn address_of(signing_key: &SigningKey) -> Address {
    let encoded = signing_key.verifying_key().to_encoded_point(false);
    let hash = Keccak256::digest(&encoded.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
