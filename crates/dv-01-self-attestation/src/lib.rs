//! # Self-Attestation Subsystem (DV-01)
//!
//! Decodes and verifies the proof a reporter attaches to a slashing claim.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Point/scalar encoding and the verification equation
//! - **Ports Layer** (`ports/`): The inbound `SelfAttestationApi`
//! - **Service Layer** (`service.rs`): Wires domain logic to the port
//!
//! ## Security Notes
//!
//! - Every component is decoded before verification is attempted
//! - The identity point is never accepted as a key or bundle point
//! - The message is verified byte for byte; callers must pass the exact
//!   serialization the reporter proved over

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export public API
pub use domain::encoding::{decode_point, encode_point, encode_scalar, reduce_scalar};
pub use domain::entities::{EncodedProof, ProofSignature, PROOF_COMPONENTS};
pub use domain::errors::AttestationError;
pub use ports::inbound::SelfAttestationApi;
pub use service::SelfAttestationService;
