pub mod ledger_provider;
pub mod wallet_api;
