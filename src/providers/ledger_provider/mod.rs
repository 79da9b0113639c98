pub mod api;
pub mod error;
pub mod provider;

pub use error::{LedgerError, LedgerResult};
pub use provider::{LedgerDataProvider, LedgerProvider};
