use std::{fmt, iter::Sum, ops::Add};

use alloy_primitives::U256;
use bigdecimal::{BigDecimal, Zero};
use num_bigint::{BigInt, Sign};
use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::constants::NATIVE_CURRENCY_DECIMALS;

/// A native currency amount in display units (smallest unit / 10^18).
///
/// Backed by an arbitrary precision decimal: converting a U256 amount of
/// smallest units is exact and summing never rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Balance(BigDecimal);

impl Balance {
    /// Converts an amount of smallest units (wei) into a display balance.
    pub fn from_wei(wei: U256) -> Self {
        let digits = BigInt::from_bytes_be(Sign::Plus, &wei.to_be_bytes::<32>());
        Self(BigDecimal::new(digits, NATIVE_CURRENCY_DECIMALS))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub const fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl From<BigDecimal> for Balance {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl Add for Balance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sum<&'a Self> for Balance {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, balance| Self(acc.0 + &balance.0))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.normalized().to_plain_string())
    }
}

/// Serialized as a plain JSON number, without going through `f64`.
impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.to_string()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}
