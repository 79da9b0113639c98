use alloy_primitives::{Address, U256, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use serde::{Deserialize, Serialize};

/// Block tag sent along with state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Latest,
}

/// Read-only subset of the Ethereum JSON-RPC API queried on the ledger node.
///
/// The server side is only implemented by the in-process node of the tests.
#[rpc(server, client, namespace = "eth")]
#[async_trait]
pub trait LedgerApi {
    /// Returns the balance of the account of given address, in wei.
    #[method(name = "getBalance")]
    async fn get_balance(&self, address: Address, block: BlockTag) -> RpcResult<U256>;

    /// Returns the number of most recent block.
    #[method(name = "blockNumber")]
    async fn block_number(&self) -> RpcResult<U64>;

    /// Returns the chain ID used for signing replay-protected transactions.
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;
}
