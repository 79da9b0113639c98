use alloy_primitives::{Address, U256};
use rstest::*;
use tracing_subscriber::{filter, FmtSubscriber};

/// Chain id reported by the fake ledger node of the fixtures.
pub const CHAIN_ID: u64 = 80002;
/// Block height reported by the fake ledger node of the fixtures.
pub const BLOCK_NUMBER: u64 = 1_234_567;

/// Wei in one unit of native currency.
pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

/// Converts a whole number of native currency units to wei.
pub fn ether(units: u64) -> U256 {
    U256::from(units) * U256::from(ONE_ETHER)
}

/// Returns a distinct address for every `seed`.
pub fn address(seed: u8) -> Address {
    Address::repeat_byte(seed)
}

/// This fixture configures the tracing subscriber for tests. The following
/// is used:
/// - The log level is set to `info`
#[fixture]
pub fn setup() {
    let filter = filter::EnvFilter::new("info");
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
