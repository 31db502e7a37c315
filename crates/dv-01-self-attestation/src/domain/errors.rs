//! # Attestation Errors
//!
//! Failures while decoding a proof bundle from its transport form.
//! A proof that decodes but does not verify is not an error; `verify`
//! returns `false` for it.

use thiserror::Error;

/// Errors that can occur while decoding a self-attestation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttestationError {
    /// The signature is not a JSON object
    #[error("Proof bundle must be an object")]
    NotAnObject,

    /// A required proof component is absent
    #[error("Missing proof component: {0}")]
    MissingComponent(&'static str),

    /// The bundle carries a key that is not a proof component
    #[error("Unexpected proof component: {0}")]
    UnexpectedComponent(String),

    /// A component is present but not a string
    #[error("Proof component {0} must be a hex string")]
    NotAString(String),

    /// Hex is malformed or the bytes are not a point on secp256k1
    #[error("Invalid curve point in {component}: {reason}")]
    InvalidPoint {
        component: &'static str,
        reason: &'static str,
    },

    /// Hex is malformed or longer than 256 bits
    #[error("Invalid scalar in {component}: {reason}")]
    InvalidScalar {
        component: &'static str,
        reason: &'static str,
    },
}
