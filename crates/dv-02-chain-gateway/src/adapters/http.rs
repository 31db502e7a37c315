//! HTTP JSON-RPC transport backed by `reqwest`.

use crate::domain::errors::ChainError;
use crate::domain::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::ports::outbound::JsonRpcTransport;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::warn;

/// JSON-RPC over HTTP POST.
pub struct HttpJsonRpcTransport {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl HttpJsonRpcTransport {
    /// Create a transport with a per-request timeout.
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        })
    }
}

fn map_reqwest(error: reqwest::Error) -> ChainError {
    if error.is_timeout() {
        ChainError::Timeout
    } else {
        ChainError::Transport(error.to_string())
    }
}

#[async_trait]
impl JsonRpcTransport for HttpJsonRpcTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, %status, "JSON-RPC endpoint returned non-success status");
            return Err(ChainError::Transport(format!("HTTP {status}")));
        }

        let rpc_response: JsonRpcResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ChainError::Timeout
            } else {
                ChainError::InvalidResponse(e.to_string())
            }
        })?;
        rpc_response.into_result()
    }
}
