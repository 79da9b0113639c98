use std::env::var;

use eyre::{eyre, Result};

use crate::{config::parse_or, constants::DEFAULT_MAX_CONNECTIONS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub socket_addr: String,
    pub max_connections: usize,
}

impl ServerConfig {
    pub const fn new(socket_addr: String) -> Self {
        Self { socket_addr, max_connections: DEFAULT_MAX_CONNECTIONS }
    }

    /// Server listening on a random local port, for tests.
    pub fn from_port(port: u16) -> Self {
        Self::new(format!("127.0.0.1:{port}"))
    }

    pub fn from_env() -> Result<Self> {
        let socket_addr = var("WALLET_AGGREGATOR_URL")
            .map_err(|_| eyre!("Missing mandatory environment variable: WALLET_AGGREGATOR_URL"))?;
        let max_connections = parse_or(&|name: &str| var(name).ok(), "RPC_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(eyre!("RPC_MAX_CONNECTIONS must be greater than 0"));
        }
        Ok(Self { socket_addr, max_connections })
    }
}
