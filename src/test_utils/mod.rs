/// Module containing fixtures for testing purposes.
pub mod fixtures;

/// Module containing an in-process ledger node.
pub mod ledger_node;

/// Module containing the mocked ledger provider.
pub mod mock_provider;

/// Module containing helpers to start the wallet API server.
pub mod rpc;
