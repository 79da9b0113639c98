use std::env::var;

use dotenvy::dotenv;
use eyre::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use wallet_aggregator::{
    config::WalletAggregatorConfig,
    providers::{aggregator::WalletAggregator, ledger_provider::LedgerDataProvider},
    wallet_api::{config::ServerConfig, router::WalletApi, run_server},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables are safe to use after this
    dotenv().ok();

    setup_tracing()?;

    // Load the configuration
    let aggregator_config = WalletAggregatorConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    tracing::info!(
        network = %aggregator_config.network_name,
        url = %aggregator_config.network_url,
        "using ledger node"
    );

    let ledger_provider =
        LedgerDataProvider::try_new(&aggregator_config.network_url, aggregator_config.rpc_request_timeout)?;
    let aggregator = WalletAggregator::new(ledger_provider, aggregator_config);
    let api = WalletApi::with_registry(aggregator, Registry::default())?;

    // Start the HTTP server
    let (socket_addr, server_handle) = run_server(api, server_config).await?;

    let url = format!("http://{socket_addr}");

    tracing::info!("Wallet aggregator running on {url}...");

    tokio::select! {
        result = server_handle => result?,
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("shutting down");
        }
    }

    Ok(())
}

/// Set up the subscriber for tracing
fn setup_tracing() -> Result<()> {
    // Add a filter to the subscriber to control the verbosity of the logs
    let filter = var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::builder().parse(filter)?;

    let stdout = tracing_subscriber::fmt::layer().with_filter(env_filter).boxed();

    tracing_subscriber::registry().with(stdout).init();

    Ok(())
}
