//! # Subsystem Wiring
//!
//! ```text
//!   dv-05 API gateway
//!          │
//!          ↓
//!   dv-04 report pipeline ──→ SelfAttestationAdapter ──→ dv-01
//!                        ├──→ ChainAdapter ───────────→ dv-02 ──→ JSON-RPC node
//!                        └──→ OracleAdapter ──────────→ dv-03 ──→ oracles, identifier service
//! ```

use crate::adapters::{ChainAdapter, OracleAdapter, SelfAttestationAdapter};
use crate::container::config::MiddlewareConfig;
use dv_02_chain_gateway::{ChainError, ChainGatewayService, HttpJsonRpcTransport};
use dv_03_oracle_gateway::{HttpOracleGateway, OracleError};
use dv_04_report_pipeline::{PipelinePorts, ReportPipelineService};
use dv_05_api_gateway::{ApiGatewayService, AppState};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Failed to build chain client: {0}")]
    Chain(#[from] ChainError),

    #[error("Failed to build oracle client: {0}")]
    Oracle(#[from] OracleError),
}

/// All initialized subsystems.
pub struct MiddlewareContainer {
    pub config: MiddlewareConfig,
    pub pipeline: Arc<ReportPipelineService>,
}

impl MiddlewareContainer {
    /// Build the HTTP clients and the pipeline. No network I/O happens here.
    pub fn new(config: MiddlewareConfig) -> Result<Self, ContainerError> {
        let transport = HttpJsonRpcTransport::new(&config.provider_url, config.outbound_timeout)?;
        let chain = Arc::new(ChainAdapter::new(ChainGatewayService::new(
            transport,
            config.chain_contracts(),
        )));

        let oracles = Arc::new(OracleAdapter::new(HttpOracleGateway::new(
            config.oracle_endpoints(),
            config.outbound_timeout,
        )?));

        let ports = PipelinePorts {
            attestation: Arc::new(SelfAttestationAdapter::default()),
            ledger: chain.clone(),
            liveness: oracles.clone(),
            corruption: oracles.clone(),
            identifiers: oracles,
            registry: chain.clone(),
            chain,
        };

        let pipeline = Arc::new(ReportPipelineService::new(
            ports,
            config.pipeline_config(),
            config.verifier.clone(),
        ));

        info!(
            designated_verifier = ?config.verifier.address(),
            version = config.version,
            chain_id = config.chain_id,
            "Subsystems initialized"
        );

        Ok(Self { config, pipeline })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            pipeline: self.pipeline.clone(),
            info: Arc::new(self.config.service_info()),
        }
    }

    /// HTTP server over the wired pipeline.
    pub fn api_gateway(&self) -> ApiGatewayService {
        ApiGatewayService::new(self.config.gateway_config(), self.app_state())
    }
}
