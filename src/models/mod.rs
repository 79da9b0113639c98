/// Module for wallet addresses and their validation.
pub mod address;

/// Module for native currency balances.
pub mod balance;

/// Module for the request and response bodies of the wallet API.
pub mod wallet;
