//! Fractional half-life decay and the price-oracle moving average.

use super::{CheckedArithmetic, HALFPOW_PRECISION, MAX_SQRT_ITERATIONS, ONE};
use crate::domain::FixedPoint;
use crate::error::{AmmError, Result};

const MAX_INT_POW: u64 = 59;
const HALF: FixedPoint = FixedPoint::from_u128(500_000_000_000_000_000);

/// Approximates `0.5^power` for a fixed-point `power`.
///
/// The integer part is applied as a shift; the fractional remainder goes
/// through the binomial series of `(1 - 0.5)^frac` until a term drops
/// below `precision`. An integer part above 59 decays to zero.
///
/// # Errors
///
/// - [`AmmError::DidNotConverge`] if 255 series terms are not enough.
/// - Arithmetic errors from the series.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::FixedPoint;
/// use crypto_swap_sim::math::halfpow;
///
/// let p = halfpow(FixedPoint::ONE, FixedPoint::from(10_000_000_000u64));
/// assert_eq!(p, Ok(FixedPoint::from_u128(500_000_000_000_000_000)));
/// ```
pub fn halfpow(power: FixedPoint, precision: FixedPoint) -> Result<FixedPoint> {
    let int_pow = power.safe_div(&ONE)?;
    let other = power.safe_sub(&int_pow.safe_mul(&ONE)?)?;
    if int_pow > FixedPoint::from(MAX_INT_POW) {
        return Ok(FixedPoint::ZERO);
    }
    let shift = int_pow.raw().low_u64() as usize;
    let result = FixedPoint::from_raw(ONE.raw() >> shift);
    if other.is_zero() {
        return Ok(result);
    }

    let mut term = ONE;
    let mut sum = ONE;
    let mut negative = false;
    for i in 1..MAX_SQRT_ITERATIONS {
        let k = FixedPoint::from(i as u64).safe_mul(&ONE)?;
        let mut c = k.safe_sub(&ONE)?;
        if other > c {
            c = other.safe_sub(&c)?;
            negative = !negative;
        } else {
            c = c.safe_sub(&other)?;
        }
        term = term
            .safe_mul(&c.safe_mul(&HALF)?.safe_div(&ONE)?)?
            .safe_div(&k)?;
        sum = if negative {
            sum.safe_sub(&term)?
        } else {
            sum.safe_add(&term)?
        };
        if term < precision {
            return result.safe_mul(&sum)?.safe_div(&ONE);
        }
    }
    Err(AmmError::DidNotConverge("halfpow"))
}

/// Decays `oracle` toward `last_price` over `elapsed` seconds.
///
/// `alpha = 0.5^(elapsed / ma_half_time)` weights the previous oracle;
/// `1 - alpha` weights the last traded price.
///
/// # Errors
///
/// - [`AmmError::DivideByZero`] if `ma_half_time` is zero.
/// - Errors from [`halfpow`].
pub fn update_price_oracle(
    oracle: FixedPoint,
    last_price: FixedPoint,
    elapsed: u64,
    ma_half_time: u64,
) -> Result<FixedPoint> {
    let power = FixedPoint::from(elapsed)
        .safe_mul(&ONE)?
        .safe_div(&FixedPoint::from(ma_half_time))?;
    let alpha = halfpow(power, HALFPOW_PRECISION)?;
    last_price
        .safe_mul(&ONE.safe_sub(&alpha)?)?
        .safe_add(&oracle.safe_mul(&alpha)?)?
        .safe_div(&ONE)
}
