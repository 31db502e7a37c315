//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::ChainError;
use async_trait::async_trait;
use shared_types::{Address, DebtPosition, Hash, SlashingReport};

/// Reads against the chain needed to authorize a slashing report.
#[async_trait]
pub trait ChainGatewayApi: Send + Sync {
    /// `getDebtor(debtor)` on the lending contract.
    async fn get_debt_position(&self, debtor: Address) -> Result<DebtPosition, ChainError>;

    /// `reportTypedHash(report)` on the reporter registry.
    async fn report_typed_hash(&self, report: &SlashingReport) -> Result<Hash, ChainError>;

    /// Current chain height.
    async fn block_number(&self) -> Result<u64, ChainError>;
}
