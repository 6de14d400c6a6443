//! Skew-dependent dynamic fee.

use super::{CheckedArithmetic, ONE};
use crate::domain::FixedPoint;
use crate::error::Result;

const FOUR: FixedPoint = FixedPoint::from_u128(4);

/// Interpolates between `min_fee` and `max_fee` by pool balance.
///
/// The skew factor `f = gamma / (gamma + 1 - 4xy/(x+y)^2)` is `1.0` for a
/// perfectly balanced pool and falls toward zero as it skews, so balanced
/// pools pay `min_fee` and skewed pools approach `max_fee`. Fees are in
/// units of [`FEE_DENOMINATOR`](super::FEE_DENOMINATOR).
///
/// # Errors
///
/// - [`AmmError::DivideByZero`](crate::error::AmmError::DivideByZero) if
///   both balances are zero.
/// - Arithmetic errors for balances near `2^256`.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::FixedPoint;
/// use crypto_swap_sim::math::dynamic_fee;
///
/// let one = FixedPoint::ONE;
/// let fee = dynamic_fee(
///     FixedPoint::from(800u64),
///     FixedPoint::from(1_000u64),
///     FixedPoint::from(230_000_000_000_000u64),
///     one,
///     one,
/// );
/// assert_eq!(fee, Ok(FixedPoint::from(800u64)));
/// ```
pub fn dynamic_fee(
    min_fee: FixedPoint,
    max_fee: FixedPoint,
    fee_gamma: FixedPoint,
    balance_in: FixedPoint,
    balance_out: FixedPoint,
) -> Result<FixedPoint> {
    let sum = balance_in.safe_add(&balance_out)?;
    let balance_term = ONE
        .safe_mul(&FOUR)?
        .safe_mul(&balance_in)?
        .safe_div(&sum)?
        .safe_mul(&balance_out)?
        .safe_div(&sum)?;
    let f = fee_gamma
        .safe_mul(&ONE)?
        .safe_div(&fee_gamma.safe_add(&ONE)?.safe_sub(&balance_term)?)?;
    min_fee
        .safe_mul(&f)?
        .safe_add(&max_fee.safe_mul(&ONE.safe_sub(&f)?)?)?
        .safe_div(&ONE)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::AmmError;

    fn fp(v: u128) -> FixedPoint {
        FixedPoint::from_u128(v)
    }

    fn fee(x: FixedPoint, y: FixedPoint) -> Result<FixedPoint> {
        dynamic_fee(fp(800), fp(1_000), fp(230_000_000_000_000), x, y)
    }

    #[test]
    fn balanced_pays_min() {
        assert_eq!(fee(FixedPoint::ONE, FixedPoint::ONE), Ok(fp(800)));
    }

    #[test]
    fn skewed_approaches_max() {
        let three = fp(3_000_000_000_000_000_000);
        assert_eq!(fee(FixedPoint::ONE, three), Ok(fp(999)));
    }

    #[test]
    fn reference_swap_post_trade_balances() {
        let x = fp(9_466_391_136_317_679_557);
        let y = fp(9_507_130_260_328_564_097);
        assert_eq!(fee(x, y), Ok(fp(803)));
    }

    #[test]
    fn one_side_empty_stays_below_max() {
        assert_eq!(fee(FixedPoint::ZERO, FixedPoint::ONE), Ok(fp(999)));
    }

    #[test]
    fn both_empty_divides_by_zero() {
        assert_eq!(
            fee(FixedPoint::ZERO, FixedPoint::ZERO),
            Err(AmmError::DivideByZero)
        );
    }
}
