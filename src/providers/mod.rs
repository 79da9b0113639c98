/// Module aggregating wallet balances on top of a ledger provider.
pub mod aggregator;

/// Module for read access to the ledger node.
pub mod ledger_provider;
