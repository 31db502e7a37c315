//! # Chain Gateway Service
//!
//! Implements `ChainGatewayApi` over any `JsonRpcTransport`.

use crate::domain::abi::{
    decode_bytes32, encode_get_debtor, encode_report_typed_hash, word_at,
    DEBTOR_END_TIMESTAMP_WORD, DEBTOR_MAX_CORRUPTION_WORD, DEBTOR_MAX_LIVENESS_WORD,
};
use crate::domain::errors::ChainError;
use crate::domain::rpc::{parse_data, parse_quantity};
use crate::ports::inbound::ChainGatewayApi;
use crate::ports::outbound::JsonRpcTransport;
use async_trait::async_trait;
use serde_json::json;
use shared_types::{Address, DebtPosition, Hash, SlashingReport};
use tracing::debug;

/// Contract addresses the gateway reads from.
#[derive(Debug, Clone, Copy)]
pub struct ChainContracts {
    /// Debt-position ledger.
    pub lending: Address,
    /// Report registry providing the typed hash.
    pub reporter_registry: Address,
}

pub struct ChainGatewayService<T: JsonRpcTransport> {
    transport: T,
    contracts: ChainContracts,
}

impl<T: JsonRpcTransport> ChainGatewayService<T> {
    pub fn new(transport: T, contracts: ChainContracts) -> Self {
        Self {
            transport,
            contracts,
        }
    }

    async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        let params = json!([
            { "to": to, "data": format!("0x{}", hex::encode(data)) },
            "latest"
        ]);
        let result = self.transport.call("eth_call", params).await?;
        parse_data(&result)
    }
}

#[async_trait]
impl<T: JsonRpcTransport> ChainGatewayApi for ChainGatewayService<T> {
    async fn get_debt_position(&self, debtor: Address) -> Result<DebtPosition, ChainError> {
        let data = self
            .eth_call(self.contracts.lending, encode_get_debtor(&debtor))
            .await?;

        let position = DebtPosition {
            end_timestamp: word_at(&data, DEBTOR_END_TIMESTAMP_WORD)?,
            max_slashable_amount_per_liveness: word_at(&data, DEBTOR_MAX_LIVENESS_WORD)?,
            max_slashable_amount_per_corruption: word_at(&data, DEBTOR_MAX_CORRUPTION_WORD)?,
        };
        debug!(
            debtor = ?debtor,
            end_timestamp = %position.end_timestamp,
            "Debt position read"
        );
        Ok(position)
    }

    async fn report_typed_hash(&self, report: &SlashingReport) -> Result<Hash, ChainError> {
        let data = self
            .eth_call(
                self.contracts.reporter_registry,
                encode_report_typed_hash(report),
            )
            .await?;
        Ok(decode_bytes32(&data)?)
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        let result = self.transport.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&result)
    }
}
