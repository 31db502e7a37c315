//! Domain layer: ABI encoding and JSON-RPC envelopes, no I/O.

pub mod abi;
pub mod errors;
pub mod rpc;
