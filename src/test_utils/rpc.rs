use std::net::SocketAddr;

use prometheus::Registry;
use tokio::task::JoinHandle;
use url::Url;

use crate::{
    config::WalletAggregatorConfig,
    providers::{aggregator::WalletAggregator, ledger_provider::LedgerDataProvider},
    wallet_api::{config::ServerConfig, router::WalletApi, run_server},
};

/// Starts the wallet API on a random local port, backed by the ledger node
/// at `ledger_url`.
///
/// Returns the address the server listens on and the handle of its accept
/// loop. Aborting the handle stops accepting new connections.
///
/// # Example
/// ```ignore
/// use wallet_aggregator::test_utils::{ledger_node::FakeLedgerNode, rpc::start_wallet_api_server};
///
/// #[tokio::test]
/// async fn test_case() {
///     let (ledger_url, _node) = FakeLedgerNode::new(1, 1).start().await.unwrap();
///     let (server_addr, server_handle) = start_wallet_api_server(ledger_url).await.unwrap();
///
///     // Query whatever wallet endpoints
///
///     server_handle.abort();
/// }
/// ```
pub async fn start_wallet_api_server(ledger_url: Url) -> Result<(SocketAddr, JoinHandle<()>), eyre::Report> {
    let config = WalletAggregatorConfig::new(ledger_url);
    let ledger_provider = LedgerDataProvider::try_new(&config.network_url, config.rpc_request_timeout)?;
    let api = WalletApi::with_registry(WalletAggregator::new(ledger_provider, config), Registry::default())?;

    Ok(run_server(api, ServerConfig::from_port(0)).await?)
}
