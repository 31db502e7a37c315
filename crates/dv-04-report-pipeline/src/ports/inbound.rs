//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::ReportResponse;
use crate::domain::errors::ReportError;
use async_trait::async_trait;
use shared_types::Address;

/// Slashing report verification and co-signing API.
#[async_trait]
pub trait ReportPipelineApi: Send + Sync {
    /// Run the full pipeline over a raw request body.
    ///
    /// Stages run in order and the first failure is returned as is.
    async fn process_report(&self, body: &[u8]) -> Result<ReportResponse, ReportError>;

    /// Address of the co-signing key.
    fn designated_verifier(&self) -> Address;
}
