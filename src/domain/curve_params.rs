//! Amplification and curvature coefficients with optional time ramp.

use serde::{Deserialize, Serialize};

use super::FixedPoint;
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// A scheduled linear move of `A` and `gamma` between two timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveRamp {
    /// Target amplification coefficient.
    pub future_a: FixedPoint,
    /// Target curvature coefficient.
    pub future_gamma: FixedPoint,
    /// Ramp start (unix seconds).
    pub initial_time: u64,
    /// Ramp end (unix seconds).
    pub future_time: u64,
}

/// Curve shape parameters of a crypto-invariant pool.
///
/// `a` is the amplification coefficient exactly as the contract stores it
/// (already multiplied by `A_MULTIPLIER` and `N^N`); `gamma` is a
/// fixed-point value, typically around `1e-4`..`1e-2`.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::{CurveParams, FixedPoint};
///
/// let curve = CurveParams::new(FixedPoint::from(4_000_000u64), FixedPoint::from(1_450_000_000_000_000u64));
/// assert_eq!(curve.a_gamma(0), Ok((curve.a, curve.gamma)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Amplification coefficient (or ramp start value).
    pub a: FixedPoint,
    /// Curvature coefficient (or ramp start value).
    pub gamma: FixedPoint,
    /// Pending ramp, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp: Option<CurveRamp>,
}

impl CurveParams {
    /// Static parameters without a ramp.
    #[must_use]
    pub const fn new(a: FixedPoint, gamma: FixedPoint) -> Self {
        Self {
            a,
            gamma,
            ramp: None,
        }
    }

    /// Attaches a ramp toward `(future_a, future_gamma)`.
    #[must_use]
    pub fn with_ramp(mut self, ramp: CurveRamp) -> Self {
        self.ramp = Some(ramp);
        self
    }

    /// Returns the `(A, gamma)` pair in force at `now`.
    ///
    /// # Errors
    ///
    /// Arithmetic errors from the interpolation.
    pub fn a_gamma(&self, now: u64) -> Result<(FixedPoint, FixedPoint)> {
        let Some(ramp) = self.ramp else {
            return Ok((self.a, self.gamma));
        };
        if now >= ramp.future_time {
            return Ok((ramp.future_a, ramp.future_gamma));
        }
        if now <= ramp.initial_time {
            return Ok((self.a, self.gamma));
        }
        let total = FixedPoint::from(ramp.future_time - ramp.initial_time);
        let elapsed = FixedPoint::from(now - ramp.initial_time);
        let remaining = total.safe_sub(&elapsed)?;
        let lerp = |start: FixedPoint, end: FixedPoint| -> Result<FixedPoint> {
            start
                .safe_mul(&remaining)?
                .safe_add(&end.safe_mul(&elapsed)?)?
                .safe_div(&total)
        };
        Ok((lerp(self.a, ramp.future_a)?, lerp(self.gamma, ramp.future_gamma)?))
    }

    /// Validates coefficients and ramp bounds.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] on a zero coefficient or an empty ramp window.
    pub fn validate(&self) -> Result<()> {
        if self.a.is_zero() {
            return Err(AmmError::InvalidSnapshot("A must be greater than zero"));
        }
        if self.gamma.is_zero() {
            return Err(AmmError::InvalidSnapshot("gamma must be greater than zero"));
        }
        if let Some(ramp) = self.ramp {
            if ramp.future_a.is_zero() || ramp.future_gamma.is_zero() {
                return Err(AmmError::InvalidSnapshot("ramp targets must be non-zero"));
            }
            if ramp.initial_time >= ramp.future_time {
                return Err(AmmError::InvalidSnapshot("ramp must end after it starts"));
            }
        }
        Ok(())
    }
}
