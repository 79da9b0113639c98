use std::time::Duration;

use jsonrpsee::core::client::Error as ClientError;
use thiserror::Error;

/// A type alias representing a result type for ledger node queries.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error that can occur when querying the ledger node.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transport failure, malformed response or error reported by the node.
    #[error("{}", describe(.0))]
    Client(#[from] ClientError),
    /// The node did not answer in time.
    #[error("ledger node did not answer within {0:?}")]
    Timeout(Duration),
}

/// Errors reported by the node read as their message alone, other client
/// errors keep their own rendering.
fn describe(err: &ClientError) -> String {
    match err {
        ClientError::Call(err) => err.message().to_owned(),
        err => err.to_string(),
    }
}
