use std::{fmt, str::FromStr};

use alloy_primitives::Address;
use serde::{Serialize, Serializer};

use crate::{constants::ADDRESS_HEX_STRING_LEN, providers::aggregator::error::AggregateError};

/// A wallet address accepted by the validator.
///
/// Keeps the exact spelling supplied by the caller, so that responses echo
/// the addresses back unchanged, next to the parsed 20 bytes used for the
/// ledger queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress {
    raw: String,
    address: Address,
}

impl WalletAddress {
    /// Parses a single address. Returns `None` if the string is not `0x`
    /// followed by exactly 40 hexadecimal digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix("0x")?;
        if digits.len() != ADDRESS_HEX_STRING_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let address = Address::from_str(digits).ok()?;
        Some(Self { raw: raw.to_owned(), address })
    }

    /// The address as supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub const fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Validates a batch of addresses.
///
/// The batch is accepted only if every entry is well formed. Otherwise every
/// offending entry is reported, in input order, so that the caller can fix
/// all of them in one round trip.
pub fn validate(addresses: &[String]) -> Result<Vec<WalletAddress>, AggregateError> {
    if addresses.is_empty() {
        return Err(AggregateError::NoAddressesProvided);
    }

    let mut valid = Vec::with_capacity(addresses.len());
    let mut invalid_addresses = Vec::new();
    for raw in addresses {
        match WalletAddress::parse(raw) {
            Some(address) => valid.push(address),
            None => invalid_addresses.push(raw.clone()),
        }
    }

    if invalid_addresses.is_empty() {
        Ok(valid)
    } else {
        Err(AggregateError::InvalidAddressFormat { invalid_addresses })
    }
}
