use hyper::StatusCode;
use thiserror::Error;

use crate::providers::ledger_provider::LedgerError;

/// Error that can occur while aggregating wallet balances.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The request did not contain any address.
    #[error("No addresses provided.")]
    NoAddressesProvided,
    /// The single address query did not contain an address.
    #[error("Address is required.")]
    AddressRequired,
    /// At least one submitted address is malformed. Lists all of them.
    #[error("Invalid address format: {}", .invalid_addresses.join(", "))]
    InvalidAddressFormat { invalid_addresses: Vec<String> },
    /// The balance of `address` could not be fetched. Voids the whole aggregation.
    #[error("Error fetching balance for {address}: {source}")]
    RpcFailure {
        address: String,
        #[source]
        source: LedgerError,
    },
    /// The network metadata could not be fetched.
    #[error("Error fetching metadata: {0}")]
    MetadataFailure(#[source] LedgerError),
    /// The ledger node does not answer.
    #[error("Ledger node unreachable: {0}")]
    Unhealthy(#[source] LedgerError),
}

impl From<&AggregateError> for StatusCode {
    fn from(error: &AggregateError) -> Self {
        match error {
            AggregateError::NoAddressesProvided
            | AggregateError::AddressRequired
            | AggregateError::InvalidAddressFormat { .. } => Self::BAD_REQUEST,
            AggregateError::RpcFailure { .. } | AggregateError::MetadataFailure(_) | AggregateError::Unhealthy(_) => {
                Self::INTERNAL_SERVER_ERROR
            }
        }
    }
}
