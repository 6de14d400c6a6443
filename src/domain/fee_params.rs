//! Per-asset static configuration: precision and dynamic fee bounds.

use serde::{Deserialize, Serialize};

use super::FixedPoint;
use crate::error::{AmmError, Result};
use crate::math::{dynamic_fee, FEE_DENOMINATOR};

/// Bounds of the skew-dependent fee charged when an asset is sold.
///
/// `min_fee` and `max_fee` are in units of `1 / 100_000`; `fee_gamma` is a
/// fixed-point value controlling how fast the fee rises with skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFee {
    /// Fee of a perfectly balanced pool.
    pub min_fee: FixedPoint,
    /// Fee approached by a fully skewed pool.
    pub max_fee: FixedPoint,
    /// Fee curvature.
    pub fee_gamma: FixedPoint,
}

impl DynamicFee {
    /// Creates a fee schedule.
    #[must_use]
    pub const fn new(min_fee: FixedPoint, max_fee: FixedPoint, fee_gamma: FixedPoint) -> Self {
        Self {
            min_fee,
            max_fee,
            fee_gamma,
        }
    }

    /// Fee rate for the given normalized balances.
    ///
    /// # Errors
    ///
    /// See [`dynamic_fee`].
    pub fn fee(&self, balance_in: FixedPoint, balance_out: FixedPoint) -> Result<FixedPoint> {
        dynamic_fee(
            self.min_fee,
            self.max_fee,
            self.fee_gamma,
            balance_in,
            balance_out,
        )
    }

    /// Validates `min_fee <= max_fee <= FEE_DENOMINATOR` and `fee_gamma > 0`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] on violation.
    pub fn validate(&self) -> Result<()> {
        if self.min_fee > self.max_fee {
            return Err(AmmError::InvalidSnapshot("min_fee exceeds max_fee"));
        }
        if self.max_fee > FEE_DENOMINATOR {
            return Err(AmmError::InvalidSnapshot("max_fee exceeds fee denominator"));
        }
        if self.fee_gamma.is_zero() {
            return Err(AmmError::InvalidSnapshot("fee_gamma must be greater than zero"));
        }
        Ok(())
    }
}

/// Static per-asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// `10^(18 - decimals)`, lifting raw units to 18 decimals.
    pub precision_multiplier: FixedPoint,
    /// Fee schedule applied when this asset is the input.
    pub swap_fee: DynamicFee,
}

impl AssetConfig {
    /// Creates an asset entry.
    #[must_use]
    pub const fn new(precision_multiplier: FixedPoint, swap_fee: DynamicFee) -> Self {
        Self {
            precision_multiplier,
            swap_fee,
        }
    }

    /// Validates the multiplier and the fee schedule.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] on a zero multiplier or a bad fee schedule.
    pub fn validate(&self) -> Result<()> {
        if self.precision_multiplier.is_zero() {
            return Err(AmmError::InvalidSnapshot(
                "precision multiplier must be greater than zero",
            ));
        }
        self.swap_fee.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee() -> DynamicFee {
        DynamicFee::new(
            FixedPoint::from(800u64),
            FixedPoint::from(1_000u64),
            FixedPoint::from(230_000_000_000_000u64),
        )
    }

    #[test]
    fn delegates_to_kernel() {
        assert_eq!(
            fee().fee(FixedPoint::ONE, FixedPoint::ONE),
            Ok(FixedPoint::from(800u64))
        );
    }

    #[test]
    fn validate_bounds() {
        assert!(fee().validate().is_ok());
        let mut inverted = fee();
        inverted.min_fee = FixedPoint::from(2_000u64);
        assert!(inverted.validate().is_err());
        let mut too_high = fee();
        too_high.max_fee = FixedPoint::from(100_001u64);
        assert!(too_high.validate().is_err());
        let mut flat = fee();
        flat.fee_gamma = FixedPoint::ZERO;
        assert!(flat.validate().is_err());
    }

    #[test]
    fn asset_requires_multiplier() {
        assert!(AssetConfig::new(FixedPoint::ONE, fee()).validate().is_ok());
        assert_eq!(
            AssetConfig::new(FixedPoint::ZERO, fee()).validate(),
            Err(AmmError::InvalidSnapshot(
                "precision multiplier must be greater than zero"
            ))
        );
    }
}
