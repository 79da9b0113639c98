use std::time::Duration;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use auto_impl::auto_impl;
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HttpClient, HttpClientBuilder},
};
use tracing::instrument;
use url::Url;

use super::{
    api::{BlockTag, LedgerApiClient},
    error::LedgerResult,
};

/// Read access to the ledger node.
///
/// The aggregation pipeline only depends on this trait, so that the node can
/// be replaced by a mock in tests.
#[async_trait]
#[auto_impl(Arc, &)]
pub trait LedgerProvider {
    /// Returns the latest balance of an address, in smallest units.
    async fn balance(&self, address: Address) -> LedgerResult<U256>;

    /// Returns the latest block number.
    async fn block_number(&self) -> LedgerResult<u64>;

    /// Returns the chain id.
    async fn chain_id(&self) -> LedgerResult<u64>;
}

/// Structure that implements the `LedgerProvider` trait over a JSON-RPC client.
#[derive(Debug, Clone)]
pub struct LedgerDataProvider<C> {
    client: C,
}

impl<C> LedgerDataProvider<C> {
    pub const fn new(client: C) -> Self {
        Self { client }
    }
}

impl LedgerDataProvider<HttpClient> {
    /// Creates a provider speaking JSON-RPC over HTTP to the node at `url`.
    /// Every request is bounded by `request_timeout`.
    pub fn try_new(url: &Url, request_timeout: Duration) -> LedgerResult<Self> {
        let client = HttpClientBuilder::default().request_timeout(request_timeout).build(url.as_str())?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl<C> LedgerProvider for LedgerDataProvider<C>
where
    C: ClientT + Send + Sync,
{
    #[instrument(skip(self), name = "eth::balance", err)]
    async fn balance(&self, address: Address) -> LedgerResult<U256> {
        Ok(self.client.get_balance(address, BlockTag::Latest).await?)
    }

    #[instrument(skip(self), name = "eth::block_number", err)]
    async fn block_number(&self) -> LedgerResult<u64> {
        Ok(self.client.block_number().await?.to::<u64>())
    }

    #[instrument(skip(self), name = "eth::chain_id", err)]
    async fn chain_id(&self) -> LedgerResult<u64> {
        Ok(self.client.chain_id().await?.to::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_serialization() {
        assert_eq!(serde_json::to_string(&BlockTag::Latest).unwrap(), "\"latest\"");
    }

    #[test]
    fn test_try_new_rejects_unsupported_scheme() {
        // Given
        let url = Url::parse("ftp://localhost:8545").unwrap();

        // When
        let provider = LedgerDataProvider::try_new(&url, Duration::from_secs(1));

        // Then
        assert!(provider.is_err());
    }
}
