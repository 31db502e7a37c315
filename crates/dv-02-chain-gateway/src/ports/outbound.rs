//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::ChainError;
use async_trait::async_trait;
use serde_json::Value;

/// A JSON-RPC endpoint.
///
/// Returns the `result` member, or maps the `error` member and transport
/// failures to `ChainError`.
#[async_trait]
pub trait JsonRpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError>;
}
