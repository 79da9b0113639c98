pub mod error;

use std::{future::Future, time::Instant};

use futures::{stream, StreamExt, TryStreamExt};
use tracing::instrument;

use self::error::AggregateError;
use crate::{
    config::WalletAggregatorConfig,
    models::{
        address::{self, WalletAddress},
        balance::Balance,
        wallet::{AggregateResponse, BalanceResponse, MetadataResponse},
    },
    prometheus_handler::WalletMetrics,
    providers::ledger_provider::{LedgerError, LedgerProvider, LedgerResult},
};

/// Aggregates the native balances of a set of wallets.
///
/// Stateless between requests: every call validates its input, queries the
/// ledger provider and builds its own result.
#[derive(Debug, Clone)]
pub struct WalletAggregator<P> {
    ledger_provider: P,
    config: WalletAggregatorConfig,
    metrics: Option<WalletMetrics>,
}

impl<P> WalletAggregator<P>
where
    P: LedgerProvider + Send + Sync,
{
    pub const fn new(ledger_provider: P, config: WalletAggregatorConfig) -> Self {
        Self { ledger_provider, config, metrics: None }
    }

    /// Records balance query durations and failures into `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: WalletMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub const fn config(&self) -> &WalletAggregatorConfig {
        &self.config
    }

    /// Sums the balances of `addresses`.
    ///
    /// The whole batch is validated before any query is sent. Balances are
    /// fetched with a bounded fan-out and consumed in input order, so the
    /// first failing address (in input order) aborts the aggregation and no
    /// partial total is ever returned. Duplicated addresses are counted once
    /// per occurrence.
    #[instrument(skip_all, fields(addresses = addresses.len()))]
    pub async fn aggregate(&self, addresses: &[String]) -> Result<AggregateResponse, AggregateError> {
        let addresses = address::validate(addresses)?;

        let balances: Vec<Balance> = stream::iter(addresses.iter().cloned())
            .map(|address| async move { self.fetch(&address).await })
            .buffered(self.config.balance_fetch_concurrency)
            .try_collect()
            .await?;

        let total_balance = balances.iter().sum();
        let addresses = addresses
            .into_iter()
            .zip(&balances)
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(address, _)| address)
            .collect();

        Ok(AggregateResponse { addresses, total_balance })
    }

    /// Returns the balance of a single address.
    #[instrument(skip(self))]
    pub async fn balance(&self, address: &str) -> Result<BalanceResponse, AggregateError> {
        if address.trim().is_empty() {
            return Err(AggregateError::AddressRequired);
        }
        let address = WalletAddress::parse(address)
            .ok_or_else(|| AggregateError::InvalidAddressFormat { invalid_addresses: vec![address.to_owned()] })?;

        let balance = self.fetch(&address).await?;
        Ok(BalanceResponse { address, balance })
    }

    /// Returns the configured network description along with the chain id and
    /// the latest block number reported by the node.
    #[instrument(skip(self))]
    pub async fn metadata(&self) -> Result<MetadataResponse, AggregateError> {
        let (chain_id, block_height) = futures::try_join!(
            self.bounded(self.ledger_provider.chain_id()),
            self.bounded(self.ledger_provider.block_number())
        )
        .map_err(AggregateError::MetadataFailure)?;

        Ok(MetadataResponse {
            network_name: self.config.network_name.clone(),
            rpc_url: self.config.network_url.to_string(),
            chain_id: chain_id.to_string(),
            block_height,
        })
    }

    /// Checks that the ledger node answers.
    pub async fn health(&self) -> Result<bool, AggregateError> {
        self.bounded(self.ledger_provider.block_number()).await.map_err(AggregateError::Unhealthy)?;
        Ok(true)
    }

    async fn fetch(&self, address: &WalletAddress) -> Result<Balance, AggregateError> {
        let started = Instant::now();
        let result = self.bounded(self.ledger_provider.balance(address.address())).await;

        if let Some(metrics) = &self.metrics {
            metrics.observe_balance_fetch(started.elapsed(), result.is_ok());
        }

        result.map(Balance::from_wei).map_err(|source| {
            tracing::warn!(%address, error = %source, "balance fetch failed");
            AggregateError::RpcFailure { address: address.to_string(), source }
        })
    }

    /// Bounds a ledger query by the configured request timeout.
    async fn bounded<T>(&self, query: impl Future<Output = LedgerResult<T>>) -> LedgerResult<T> {
        let timeout = self.config.rpc_request_timeout;
        tokio::time::timeout(timeout, query).await.unwrap_or_else(|_| Err(LedgerError::Timeout(timeout)))
    }
}
