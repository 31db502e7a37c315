//! # Adapter Implementations
//!
//! Concrete implementations of the report pipeline's outbound ports, each
//! backed by one subsystem crate:
//!
//! | Port | Adapter | Backed by |
//! |---|---|---|
//! | `AttestationVerifier` | `SelfAttestationAdapter` | dv-01 |
//! | `DebtLedger`, `ReportRegistry`, `ChainHeightSource` | `ChainAdapter` | dv-02 |
//! | `LivenessOracle`, `CorruptionOracle`, `IdentifierIssuer` | `OracleAdapter` | dv-03 |
//!
//! Subsystem errors are folded into `DependencyError`: a collaborator that
//! answered with something unusable is `Malformed`, anything else is
//! `Unavailable`.

pub mod attestation;
pub mod chain;
pub mod oracle;

pub use attestation::SelfAttestationAdapter;
pub use chain::ChainAdapter;
pub use oracle::OracleAdapter;
