use std::{env::var, str::FromStr, time::Duration};

use eyre::{eyre, Result};
use url::Url;

use crate::constants::{
    DEFAULT_BALANCE_FETCH_CONCURRENCY, DEFAULT_LEDGER_NETWORK_NAME, DEFAULT_LEDGER_RPC_URL,
    DEFAULT_RPC_REQUEST_TIMEOUT,
};

/// Parses the variable `name` if it is set, falls back to `default` otherwise.
pub(crate) fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |value| {
        value.trim().parse().map_err(|err| eyre!("invalid value for env var {name}: {value} ({err})"))
    })
}

/// Configuration of the balance aggregation and of the ledger node it queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletAggregatorConfig {
    /// JSON-RPC endpoint of the ledger node.
    pub network_url: Url,
    /// Human readable name of the ledger network.
    pub network_name: String,
    /// Upper bound on every ledger query.
    pub rpc_request_timeout: Duration,
    /// Number of balance queries in flight for a single request.
    pub balance_fetch_concurrency: usize,
}

impl WalletAggregatorConfig {
    /// Configuration with default network name, timeout and concurrency.
    pub fn new(network_url: Url) -> Self {
        Self {
            network_url,
            network_name: DEFAULT_LEDGER_NETWORK_NAME.to_string(),
            rpc_request_timeout: DEFAULT_RPC_REQUEST_TIMEOUT,
            balance_fetch_concurrency: DEFAULT_BALANCE_FETCH_CONCURRENCY,
        }
    }

    /// Reads `LEDGER_RPC_URL`, `LEDGER_NETWORK_NAME`, `RPC_REQUEST_TIMEOUT_MS`
    /// and `BALANCE_FETCH_CONCURRENCY`. Unset variables take their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let network_url = parse_or(&lookup, "LEDGER_RPC_URL", Url::parse(DEFAULT_LEDGER_RPC_URL)?)?;
        let network_name = lookup("LEDGER_NETWORK_NAME").unwrap_or_else(|| DEFAULT_LEDGER_NETWORK_NAME.to_string());
        let timeout_ms = parse_or(
            &lookup,
            "RPC_REQUEST_TIMEOUT_MS",
            u64::try_from(DEFAULT_RPC_REQUEST_TIMEOUT.as_millis())?,
        )?;
        let balance_fetch_concurrency =
            parse_or(&lookup, "BALANCE_FETCH_CONCURRENCY", DEFAULT_BALANCE_FETCH_CONCURRENCY)?;

        if timeout_ms == 0 {
            return Err(eyre!("RPC_REQUEST_TIMEOUT_MS must be greater than 0"));
        }
        if balance_fetch_concurrency == 0 {
            return Err(eyre!("BALANCE_FETCH_CONCURRENCY must be greater than 0"));
        }

        Ok(Self {
            network_url,
            network_name,
            rpc_request_timeout: Duration::from_millis(timeout_ms),
            balance_fetch_concurrency,
        })
    }
}
