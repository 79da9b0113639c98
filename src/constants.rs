use std::time::Duration;

/// Number of hexadecimal characters of an address, without the `0x` prefix.
pub const ADDRESS_HEX_STRING_LEN: usize = 40;

/// Number of decimals of the native currency (1 unit = 10^18 smallest units).
pub const NATIVE_CURRENCY_DECIMALS: i64 = 18;

/// Ledger node queried when `LEDGER_RPC_URL` is not set.
pub const DEFAULT_LEDGER_RPC_URL: &str = "https://rpc-amoy.polygon.technology/";
/// Network name reported by the metadata route when `LEDGER_NETWORK_NAME` is not set.
pub const DEFAULT_LEDGER_NETWORK_NAME: &str = "Polygon Amoy";

/// Upper bound on a single ledger query.
pub const DEFAULT_RPC_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Number of balance queries in flight for a single aggregate request.
pub const DEFAULT_BALANCE_FETCH_CONCURRENCY: usize = 4;
/// Number of connections served at the same time.
pub const DEFAULT_MAX_CONNECTIONS: usize = 100;

/// Largest request body accepted by the HTTP server, in bytes.
pub const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;
