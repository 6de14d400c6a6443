//! Serde adapter writing 256-bit words as decimal strings.
//!
//! Snapshot fields routinely exceed `u64::MAX`, so JSON numbers are not
//! lossless for them. Serialization always emits a string; deserialization
//! accepts either a decimal string or a plain unsigned JSON integer.
//!
//! ```text
//! #[serde(with = "crate::math::decimal")]
//! balance: U256,
//! ```

use core::fmt;

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

/// Serializes a word as its decimal representation.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserializes a word from a decimal string or an unsigned integer.
///
/// # Errors
///
/// Fails on hex, signed, fractional or out-of-range input.
pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor)
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or unsigned integer below 2^256")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(E::invalid_value(de::Unexpected::Str(v), &self));
        }
        U256::from_dec_str(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
