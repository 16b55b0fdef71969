//! Request/response records of the node HTTP API. Top-level field names are
//! capitalized to match the wire shape the gateway expects.

use blocknet_consensus_core::block::Block;
use blocknet_consensus_core::keys::Address;
use blocknet_consensus_core::tx::{Transaction, UtxoEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockByHeightRequest {
    #[serde(rename = "Height")]
    pub height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockByHeightResponse {
    #[serde(rename = "Block")]
    pub block: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUtxosByAddressRequest {
    #[serde(rename = "Address")]
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUtxosByAddressResponse {
    #[serde(rename = "UTXOs")]
    pub utxos: Vec<UtxoEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionRequest {
    #[serde(rename = "Transaction")]
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    #[serde(rename = "Transaction")]
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetHeightResponse {
    #[serde(rename = "Height")]
    pub height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcheckResponse {
    pub status: String,
}
