//! Scaled fixed-point kernel over [`FixedPoint`].
//!
//! `mul` and `div` rescale by [`ONE`] and round to nearest. Overflow
//! detection on products uses the wrapped product's round trip
//! (`(a * b) / a == b`) rather than a width check, so the failure
//! conditions match the on-chain pool.

use crate::domain::FixedPoint;
use crate::error::{AmmError, Result};

use super::{CheckedArithmetic, MAX_SQRT_ITERATIONS, ONE};

const HALF_ONE: FixedPoint = FixedPoint::from_u128(500_000_000_000_000_000);

/// Checked addition.
///
/// # Errors
///
/// [`AmmError::ArithmeticOverflow`] past `2^256 - 1`.
pub fn add(a: FixedPoint, b: FixedPoint) -> Result<FixedPoint> {
    a.safe_add(&b)
}

/// Checked subtraction.
///
/// # Errors
///
/// [`AmmError::ArithmeticUnderflow`] if `b > a`.
pub fn sub(a: FixedPoint, b: FixedPoint) -> Result<FixedPoint> {
    a.safe_sub(&b)
}

/// Wrapped product plus the round-trip overflow check.
fn full_mul(a: FixedPoint, b: FixedPoint, op: &'static str) -> Result<FixedPoint> {
    if a.is_zero() || b.is_zero() {
        return Ok(FixedPoint::ZERO);
    }
    let (wrapped, _) = a.raw().overflowing_mul(b.raw());
    let product = FixedPoint::from_raw(wrapped);
    if product.checked_div(&a) != Some(b) {
        return Err(AmmError::ArithmeticOverflow(op));
    }
    Ok(product)
}

/// `a * b / ONE`, rounded to nearest.
///
/// # Errors
///
/// [`AmmError::ArithmeticOverflow`] if the unscaled product does not fit.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::FixedPoint;
/// use crypto_swap_sim::math::fixed;
///
/// let two = FixedPoint::from_u128(2_000_000_000_000_000_000);
/// let three = FixedPoint::from_u128(3_000_000_000_000_000_000);
/// assert_eq!(fixed::mul(two, three), Ok(FixedPoint::from_u128(6_000_000_000_000_000_000)));
/// assert!(fixed::mul(FixedPoint::MAX, FixedPoint::from(2u64)).is_err());
/// ```
pub fn mul(a: FixedPoint, b: FixedPoint) -> Result<FixedPoint> {
    let product = full_mul(a, b, "fixed mul")?;
    let rounded = product
        .checked_add(&HALF_ONE)
        .ok_or(AmmError::ArithmeticOverflow("fixed mul rounding"))?;
    rounded.safe_div(&ONE)
}

/// `a * ONE / b`, rounded to nearest.
///
/// # Errors
///
/// - [`AmmError::DivideByZero`] if `b` is zero.
/// - [`AmmError::ArithmeticOverflow`] if `a * ONE` does not fit.
pub fn div(a: FixedPoint, b: FixedPoint) -> Result<FixedPoint> {
    if b.is_zero() {
        return Err(AmmError::DivideByZero);
    }
    let scaled = full_mul(a, ONE, "fixed div")?;
    let half = b.raw() >> 1;
    let rounded = scaled
        .checked_add(&FixedPoint::from_raw(half))
        .ok_or(AmmError::ArithmeticOverflow("fixed div rounding"))?;
    rounded.safe_div(&b)
}

/// Square root of a fixed-point value, itself in fixed point.
///
/// Newton iteration `z = (x * ONE / z + z) / 2` seeded with `(x + ONE) / 2`,
/// stopping once two consecutive iterates agree.
///
/// # Errors
///
/// - [`AmmError::DidNotConverge`] after 256 iterations.
/// - [`AmmError::ArithmeticOverflow`] if `x * ONE` does not fit.
pub fn int_sqrt(x: FixedPoint) -> Result<FixedPoint> {
    if x.is_zero() {
        return Ok(FixedPoint::ZERO);
    }
    let two = FixedPoint::from(2u64);
    let mut z = x.safe_add(&ONE)?.safe_div(&two)?;
    let mut y = x;
    for _ in 0..MAX_SQRT_ITERATIONS {
        if z == y {
            return Ok(y);
        }
        y = z;
        z = x.safe_mul(&ONE)?.safe_div(&z)?.safe_add(&z)?.safe_div(&two)?;
    }
    Err(AmmError::DidNotConverge("int_sqrt"))
}
