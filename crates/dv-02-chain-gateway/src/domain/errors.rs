//! # Chain Errors

use thiserror::Error;

/// ABI decoding failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Return data is shorter than the word being read
    #[error("Return data truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// Return data is not hex
    #[error("Return data is not hex")]
    NotHex,
}

/// Errors from chain reads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Could not reach the node or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node did not answer within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The node answered with a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node answered with something that is not a valid result
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    /// The result could not be decoded
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),
}
