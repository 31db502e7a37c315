//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::IdentifierRequest;
use crate::domain::errors::OracleError;
use async_trait::async_trait;
use serde_json::Value;
use shared_types::{CorruptionOracleResponse, IdentifierResponse, LivenessOracleResponse};

/// External data feeds consulted while verifying a report.
///
/// Responses are returned as received; range and presence checks belong to
/// the caller.
#[async_trait]
pub trait OracleGatewayApi: Send + Sync {
    /// `GET <liveness endpoint><query>`.
    async fn fetch_liveness(&self, query: &str) -> Result<LivenessOracleResponse, OracleError>;

    /// `POST <corruption endpoint>` with `{events}` and the bearer credential.
    ///
    /// `events` is forwarded unchanged.
    async fn validate_corruption(
        &self,
        events: &Value,
    ) -> Result<CorruptionOracleResponse, OracleError>;

    /// `POST <identifier endpoint>` with the report context and the bearer credential.
    async fn issue_identifier(
        &self,
        request: &IdentifierRequest<'_>,
    ) -> Result<IdentifierResponse, OracleError>;
}
