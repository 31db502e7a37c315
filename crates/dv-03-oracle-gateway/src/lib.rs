//! # Oracle Gateway Subsystem (DV-03)
//!
//! HTTP clients for the three off-chain collaborators consulted while a
//! slashing report is verified:
//!
//! | Collaborator | Call | Auth |
//! |---|---|---|
//! | Liveness oracle | `GET <endpoint><query>` | none |
//! | Corruption oracle | `POST <endpoint>` `{events}` | bearer |
//! | Identifier service | `POST <endpoint>` `{report, eventData, eventType, serviceProviderAddress}` | bearer |
//!
//! Every request is bounded by the configured timeout. No retries.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::entities::{
    BearerToken, CorruptionValidationRequest, IdentifierRequest, OracleEndpoints,
};
pub use domain::errors::OracleError;
pub use ports::inbound::OracleGatewayApi;
pub use service::HttpOracleGateway;
