//! 256-bit unsigned fixed-point value with an implicit `10^18` scale.

use core::fmt;
use core::str::FromStr;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// A 256-bit unsigned integer interpreted with an implicit scale of `10^18`.
///
/// The wrapper does not rescale anything by itself: [`checked_mul`](Self::checked_mul)
/// and friends operate on the raw representation, exactly like the integer
/// expressions of the pool contract. Scaled arithmetic with rounding lives in
/// [`crate::math::fixed`].
///
/// Values serialize as decimal strings so that words above `u64::MAX`
/// survive JSON round-trips.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::FixedPoint;
///
/// let half = FixedPoint::from_u128(500_000_000_000_000_000);
/// assert_eq!(half.checked_add(&half), Some(FixedPoint::ONE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct FixedPoint(#[serde(with = "crate::math::decimal")] U256);

impl FixedPoint {
    /// Zero.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// `1.0`, i.e. `10^18`.
    pub const ONE: Self = Self::from_u128(1_000_000_000_000_000_000);

    /// Largest representable word.
    pub const MAX: Self = Self(U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]));

    /// Builds a value from its raw `u128` representation.
    pub const fn from_u128(raw: u128) -> Self {
        Self(U256([raw as u64, (raw >> 64) as u64, 0, 0]))
    }

    /// Wraps a raw 256-bit word.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw 256-bit word.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication of the raw words. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Floor division of the raw words. Returns `None` if `other` is zero.
    #[must_use]
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        self.0.checked_div(other.0).map(Self)
    }

    /// Absolute difference.
    pub fn abs_diff(&self, other: &Self) -> Self {
        if self.0 >= other.0 {
            Self(self.0 - other.0)
        } else {
            Self(other.0 - self.0)
        }
    }

    /// Floor integer square root of the raw word.
    pub fn isqrt(&self) -> Self {
        Self(self.0.integer_sqrt())
    }
}

impl From<u64> for FixedPoint {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for FixedPoint {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<U256> for FixedPoint {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl FromStr for FixedPoint {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| AmmError::InvalidSnapshot("expected a decimal integer"))
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
