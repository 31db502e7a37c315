//! # Report Pipeline Subsystem (DV-04)
//!
//! Verifies a reporter's slashing claim and, when it holds, co-signs the
//! on-chain report as the designated verifier.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): envelope validation, three-party
//!   reconciliation, fixed-point slash calculation, report assembly and the
//!   co-signing key. No I/O.
//! - **Ports Layer** (`ports/`): `ReportPipelineApi` (inbound) and one
//!   trait per collaborator (outbound).
//! - **Service Layer** (`service.rs`): `ReportPipelineService` runs the
//!   stages in order.
//!
//! ## Invariants
//!
//! - A report is never signed for a debtor without an active position.
//! - The proposed amount is ratified only on exact integer equality with
//!   the recomputed amount.
//! - Claimed, attested and oracle data must agree field by field.

pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export public API
pub use domain::entities::{
    CorruptionClaim, LivenessClaim, ReportInputs, ReportRequest, ReportResponse, SelfAttestation,
};
pub use domain::envelope::validate_envelope;
pub use domain::errors::{messages, ReportError, ReportErrorKind};
pub use domain::signer::{DesignatedVerifier, SignerError};
pub use domain::slash::{compute_slash_amount, parse_severity};
pub use ports::inbound::ReportPipelineApi;
pub use ports::outbound::{
    AttestationVerdict, AttestationVerifier, ChainHeightSource, CorruptionOracle, DebtLedger,
    DependencyError, IdentifierContext, IdentifierIssuer, LivenessOracle, ReportRegistry,
};
pub use service::{PipelineConfig, PipelinePorts, ReportPipelineService};
