use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, U256, U64};
use jsonrpsee::{
    core::{async_trait, RpcResult},
    server::{Server, ServerHandle},
    types::ErrorObjectOwned,
};
use url::Url;

use crate::providers::ledger_provider::api::{BlockTag, LedgerApiServer};

/// JSON-RPC error code returned for addresses configured to fail.
pub const NODE_ERROR_CODE: i32 = -32000;
/// JSON-RPC error message returned for addresses configured to fail.
pub const NODE_ERROR_MESSAGE: &str = "node unavailable";

/// In-process ledger node answering `eth_getBalance`, `eth_blockNumber` and
/// `eth_chainId` from fixed state.
///
/// Addresses without a configured balance hold zero, like untouched accounts
/// on a real network.
#[derive(Debug, Clone, Default)]
pub struct FakeLedgerNode {
    balances: HashMap<Address, U256>,
    failing: HashSet<Address>,
    chain_id: u64,
    block_number: u64,
}

impl FakeLedgerNode {
    pub fn new(chain_id: u64, block_number: u64) -> Self {
        Self { chain_id, block_number, ..Default::default() }
    }

    #[must_use]
    pub fn with_balance(mut self, address: Address, wei: U256) -> Self {
        self.balances.insert(address, wei);
        self
    }

    /// Makes every balance query for `address` fail with a node error.
    #[must_use]
    pub fn with_failure(mut self, address: Address) -> Self {
        self.failing.insert(address);
        self
    }

    /// Starts the node on a random local port and returns its URL.
    ///
    /// The node stops when the returned handle is stopped or dropped.
    pub async fn start(self) -> Result<(Url, ServerHandle), eyre::Report> {
        let server = Server::builder().build("127.0.0.1:0").await?;
        let addr = server.local_addr()?;

        let handle = server.start(self.into_rpc());

        Ok((Url::parse(&format!("http://{addr}"))?, handle))
    }
}

#[async_trait]
impl LedgerApiServer for FakeLedgerNode {
    async fn get_balance(&self, address: Address, _block: BlockTag) -> RpcResult<U256> {
        if self.failing.contains(&address) {
            return Err(ErrorObjectOwned::owned(NODE_ERROR_CODE, NODE_ERROR_MESSAGE, None::<()>));
        }
        Ok(self.balances.get(&address).copied().unwrap_or_default())
    }

    async fn block_number(&self) -> RpcResult<U64> {
        Ok(U64::from(self.block_number))
    }

    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(U64::from(self.chain_id))
    }
}
