//! JSON-RPC envelope types and Ethereum quantity/data parsing.

use super::errors::{AbiError, ChainError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    pub id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// The result, or the node's error object as a `ChainError`.
    pub fn into_result(self) -> Result<Value, ChainError> {
        if let Some(error) = self.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| ChainError::InvalidResponse("missing result".into()))
    }
}

/// Parse a hex quantity such as `0x1b4`.
pub fn parse_quantity(value: &Value) -> Result<u64, ChainError> {
    let text = value
        .as_str()
        .ok_or_else(|| ChainError::InvalidResponse(format!("expected quantity, got {value}")))?;
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::InvalidResponse(format!("quantity without 0x: {text}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|_| ChainError::InvalidResponse(format!("bad quantity: {text}")))
}

/// Parse `0x`-prefixed hex data.
pub fn parse_data(value: &Value) -> Result<Vec<u8>, ChainError> {
    let text = value
        .as_str()
        .ok_or_else(|| ChainError::InvalidResponse(format!("expected data, got {value}")))?;
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|_| ChainError::Abi(AbiError::NotHex))
}
