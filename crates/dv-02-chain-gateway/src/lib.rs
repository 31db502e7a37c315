//! # Chain Gateway Subsystem (DV-02)
//!
//! Read-only access to the two contracts the middleware depends on:
//!
//! - The lending contract, for a service provider's debt position
//!   (`getDebtor`).
//! - The reporter registry, for the contract-canonical digest of a slashing
//!   report (`reportTypedHash`).
//!
//! Plus the current block number, used for report deadlines.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): ABI codec and JSON-RPC envelopes
//! - **Ports Layer** (`ports/`): `ChainGatewayApi` (inbound) and
//!   `JsonRpcTransport` (outbound)
//! - **Adapters** (`adapters/`): `reqwest` HTTP transport
//! - **Service Layer** (`service.rs`): `ChainGatewayService`
//!
//! All calls are `eth_call` against `latest`; nothing is ever sent as a
//! transaction.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::http::HttpJsonRpcTransport;
pub use domain::errors::{AbiError, ChainError};
pub use ports::inbound::ChainGatewayApi;
pub use ports::outbound::JsonRpcTransport;
pub use service::{ChainContracts, ChainGatewayService};
