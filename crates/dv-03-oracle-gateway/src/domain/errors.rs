//! # Oracle Errors

use thiserror::Error;

/// Errors talking to an external oracle or the identifier service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// Connection failed or the request could not be sent
    #[error("Transport error: {0}")]
    Transport(String),

    /// No answer within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// 2xx response whose body is not the expected JSON
    #[error("Malformed response body: {0}")]
    Decode(String),
}

impl OracleError {
    /// Whether the collaborator answered, but with an unusable body.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
