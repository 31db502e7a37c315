//! Oracle and identifier-service calls backed by dv-03.

use async_trait::async_trait;
use dv_03_oracle_gateway::{IdentifierRequest, OracleError, OracleGatewayApi};
use dv_04_report_pipeline::{
    CorruptionOracle, DependencyError, IdentifierContext, IdentifierIssuer, LivenessOracle,
};
use serde_json::Value;
use shared_types::{CorruptionOracleResponse, IdentifierResponse, LivenessOracleResponse};

/// Runtime implementation of the liveness, corruption and identifier ports.
pub struct OracleAdapter<O> {
    gateway: O,
}

impl<O: OracleGatewayApi> OracleAdapter<O> {
    pub fn new(gateway: O) -> Self {
        Self { gateway }
    }
}

pub(crate) fn map_oracle_error(error: OracleError) -> DependencyError {
    if error.is_decode() {
        DependencyError::Malformed(error.to_string())
    } else {
        DependencyError::Unavailable(error.to_string())
    }
}

#[async_trait]
impl<O: OracleGatewayApi> LivenessOracle for OracleAdapter<O> {
    async fn fetch_liveness(&self, query: &str) -> Result<LivenessOracleResponse, DependencyError> {
        self.gateway
            .fetch_liveness(query)
            .await
            .map_err(map_oracle_error)
    }
}

#[async_trait]
impl<O: OracleGatewayApi> CorruptionOracle for OracleAdapter<O> {
    async fn validate_corruption_events(
        &self,
        events: &Value,
    ) -> Result<CorruptionOracleResponse, DependencyError> {
        self.gateway
            .validate_corruption(events)
            .await
            .map_err(map_oracle_error)
    }
}

#[async_trait]
impl<O: OracleGatewayApi> IdentifierIssuer for OracleAdapter<O> {
    async fn issue_identifier(
        &self,
        context: IdentifierContext<'_>,
    ) -> Result<IdentifierResponse, DependencyError> {
        let request = IdentifierRequest {
            report: context.report,
            event_data: context.event_data,
            event_type: context.event_type,
            service_provider_address: context.service_provider,
        };
        self.gateway
            .issue_identifier(&request)
            .await
            .map_err(map_oracle_error)
    }
}
