//! Several 128-bit prices packed into one 256-bit word.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::FixedPoint;
use crate::error::{AmmError, Result};
use crate::math::{PRICE_MASK, PRICE_SIZE};

/// Number of 128-bit slots in a word.
pub const MAX_SLOTS: usize = 256 / PRICE_SIZE;

/// Up to two fixed-point prices stored in 128-bit slots of one word.
///
/// Slot `0` occupies the low 128 bits; higher asset indices sit in more
/// significant slots. A two-asset pool uses a single slot, but the codec
/// is written for any `K <= 2` so that it round-trips words produced by
/// wider pools.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::{FixedPoint, PackedPrices};
///
/// let p = FixedPoint::from_u128(54_451_990_779_514_461);
/// let packed = PackedPrices::pack(&[p]).expect("fits in 128 bits");
/// assert_eq!(packed.unpack::<1>(), [p]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedPrices(#[serde(with = "crate::math::decimal")] U256);

impl PackedPrices {
    /// Wraps an already packed word.
    #[must_use]
    pub const fn from_word(word: U256) -> Self {
        Self(word)
    }

    /// Returns the packed word.
    #[must_use]
    pub const fn word(&self) -> U256 {
        self.0
    }

    /// Packs `prices`, first element into the lowest slot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnsafeValue`] if any price needs more than 128 bits.
    /// - [`AmmError::InvalidQuantity`] if more than two prices are given.
    pub fn pack(prices: &[FixedPoint]) -> Result<Self> {
        if prices.len() > MAX_SLOTS {
            return Err(AmmError::InvalidQuantity("too many prices for one word"));
        }
        let mut packed = U256::zero();
        for price in prices.iter().rev() {
            if price.raw() > PRICE_MASK {
                return Err(AmmError::UnsafeValue("packed price exceeds 128 bits"));
            }
            packed = (packed << PRICE_SIZE) | price.raw();
        }
        Ok(Self(packed))
    }

    /// Unpacks the lowest `K` slots.
    #[must_use]
    pub fn unpack<const K: usize>(&self) -> [FixedPoint; K] {
        let mut word = self.0;
        let mut out = [FixedPoint::ZERO; K];
        for slot in &mut out {
            *slot = FixedPoint::from_raw(word & PRICE_MASK);
            word = word >> PRICE_SIZE;
        }
        out
    }

    /// Returns slot `k`, or zero for `k >= 2`.
    #[must_use]
    pub fn get(&self, k: usize) -> FixedPoint {
        if k >= MAX_SLOTS {
            return FixedPoint::ZERO;
        }
        FixedPoint::from_raw((self.0 >> (k * PRICE_SIZE)) & PRICE_MASK)
    }
}

impl fmt::Display for PackedPrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
