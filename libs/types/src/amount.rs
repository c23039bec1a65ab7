//! Raw token amounts
//!
//! A [`RawAmount`] is an arbitrary-precision unsigned integer in the token's
//! smallest unit. Unsigned storage makes negative amounts unrepresentable, and
//! arbitrary precision means intermediate products such as
//! `amount_in * 997 * reserve_out` never overflow.

use crate::errors::{Result, TypesError};
use num_bigint::BigUint;
use std::str::FromStr;

/// Token quantity in its smallest on-chain unit
pub type RawAmount = BigUint;

/// Parse a base-10 raw amount, e.g. a reserve read from chain as a string
pub fn parse_raw(input: &str) -> Result<RawAmount> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypesError::InvalidRawAmount(input.to_string()));
    }
    BigUint::from_str(trimmed).map_err(|_| TypesError::InvalidRawAmount(input.to_string()))
}

/// Serde adapter storing raw amounts as base-10 strings.
///
/// JSON numbers lose precision past 2^53, so every amount crossing a file or
/// API boundary goes through here.
pub mod amount_serde {
    use super::{parse_raw, RawAmount};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &RawAmount, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<RawAmount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_raw(&raw).map_err(serde::de::Error::custom)
    }

    /// Same encoding for optional fields
    pub mod option {
        use super::super::{parse_raw, RawAmount};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<RawAmount>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_some(&v.to_str_radix(10)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<RawAmount>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse_raw(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
