//! Chain reads backed by dv-02.

use async_trait::async_trait;
use dv_02_chain_gateway::{ChainError, ChainGatewayApi};
use dv_04_report_pipeline::{ChainHeightSource, DebtLedger, DependencyError, ReportRegistry};
use shared_types::{Address, DebtPosition, Hash, SlashingReport};

/// Runtime implementation of the ledger, registry and chain-height ports.
pub struct ChainAdapter<G> {
    gateway: G,
}

impl<G: ChainGatewayApi> ChainAdapter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

/// Transport failures mean the node could not be asked; everything else
/// means it answered with something unusable.
pub(crate) fn map_chain_error(error: ChainError) -> DependencyError {
    match error {
        ChainError::Transport(_) | ChainError::Timeout => {
            DependencyError::Unavailable(error.to_string())
        }
        ChainError::Rpc { .. } | ChainError::InvalidResponse(_) | ChainError::Abi(_) => {
            DependencyError::Malformed(error.to_string())
        }
    }
}

#[async_trait]
impl<G: ChainGatewayApi> DebtLedger for ChainAdapter<G> {
    async fn read_debt_position(&self, debtor: Address) -> Result<DebtPosition, DependencyError> {
        self.gateway
            .get_debt_position(debtor)
            .await
            .map_err(map_chain_error)
    }
}

#[async_trait]
impl<G: ChainGatewayApi> ReportRegistry for ChainAdapter<G> {
    async fn compute_report_digest(&self, report: &SlashingReport) -> Result<Hash, DependencyError> {
        self.gateway
            .report_typed_hash(report)
            .await
            .map_err(map_chain_error)
    }
}

#[async_trait]
impl<G: ChainGatewayApi> ChainHeightSource for ChainAdapter<G> {
    async fn read_chain_height(&self) -> Result<u64, DependencyError> {
        self.gateway.block_number().await.map_err(map_chain_error)
    }
}
