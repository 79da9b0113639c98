use serde::{Deserialize, Serialize};

use super::{address::WalletAddress, balance::Balance};

/// Body of `POST /api/wallet/aggregate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AggregateRequest {
    pub addresses: Vec<String>,
}

/// Addresses holding a non zero balance, in request order, and the total
/// balance of every requested address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub addresses: Vec<WalletAddress>,
    pub total_balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceResponse {
    pub address: WalletAddress,
    pub balance: Balance,
}

/// Description of the ledger network the service is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub network_name: String,
    pub rpc_url: String,
    pub chain_id: String,
    pub block_height: u64,
}

/// Error body returned when some of the submitted addresses are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidAddressBody {
    pub error: &'static str,
    pub invalid_addresses: Vec<String>,
}
