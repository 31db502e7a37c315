//! # Oracle Gateway Service
//!
//! `reqwest` implementation of `OracleGatewayApi`.

use crate::domain::entities::{CorruptionValidationRequest, IdentifierRequest, OracleEndpoints};
use crate::domain::errors::OracleError;
use crate::ports::inbound::OracleGatewayApi;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{CorruptionOracleResponse, IdentifierResponse, LivenessOracleResponse};
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpOracleGateway {
    http_client: reqwest::Client,
    endpoints: OracleEndpoints,
}

impl HttpOracleGateway {
    /// Create a gateway whose every request is bounded by `timeout`.
    pub fn new(endpoints: OracleEndpoints, timeout: Duration) -> Result<Self, OracleError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        Ok(Self {
            http_client,
            endpoints,
        })
    }
}

fn map_reqwest(error: reqwest::Error) -> OracleError {
    if error.is_timeout() {
        OracleError::Timeout
    } else {
        OracleError::Transport(error.to_string())
    }
}

/// Check the status and decode the body.
///
/// An empty 2xx body decodes as `T::default()`, so missing fields surface
/// to the caller as absent values rather than transport errors.
async fn read_json<T>(collaborator: &'static str, response: reqwest::Response) -> Result<T, OracleError>
where
    T: DeserializeOwned + Default,
{
    let status = response.status();
    if !status.is_success() {
        warn!(collaborator, %status, "Collaborator returned non-success status");
        return Err(OracleError::Status(status.as_u16()));
    }

    let body = response.bytes().await.map_err(map_reqwest)?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&body).map_err(|e| {
        warn!(collaborator, error = %e, "Collaborator returned malformed body");
        OracleError::Decode(e.to_string())
    })
}

#[async_trait]
impl OracleGatewayApi for HttpOracleGateway {
    async fn fetch_liveness(&self, query: &str) -> Result<LivenessOracleResponse, OracleError> {
        let url = format!("{}{}", self.endpoints.liveness, query);
        debug!(%url, "Fetching liveness data");

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_reqwest)?;
        read_json("liveness oracle", response).await
    }

    async fn validate_corruption(
        &self,
        events: &Value,
    ) -> Result<CorruptionOracleResponse, OracleError> {
        debug!(
            events = events.as_array().map_or(0, Vec::len),
            "Validating corruption events"
        );

        let response = self
            .http_client
            .post(&self.endpoints.corruption)
            .bearer_auth(self.endpoints.corruption_token.expose())
            .json(&CorruptionValidationRequest { events })
            .send()
            .await
            .map_err(map_reqwest)?;
        read_json("corruption oracle", response).await
    }

    async fn issue_identifier(
        &self,
        request: &IdentifierRequest<'_>,
    ) -> Result<IdentifierResponse, OracleError> {
        debug!(debtor = ?request.service_provider_address, "Requesting report identifier");

        let response = self
            .http_client
            .post(&self.endpoints.identifier)
            .bearer_auth(self.endpoints.identifier_token.expose())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest)?;
        read_json("identifier service", response).await
    }
}
