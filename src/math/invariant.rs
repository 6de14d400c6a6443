//! Newton-Raphson solver for the pool invariant `D`.

use tracing::trace;

use super::{
    fold_g1k0, sort_desc, CheckedArithmetic, A_MULTIPLIER, CONVERGENCE_SCALE, MAX_BALANCE_FRAC,
    MAX_ITERATIONS, MAX_X0, MIN_BALANCE_FRAC, MIN_BALANCE_RATIO, MIN_D_TOLERANCE, MIN_X0,
    N, N_COINS, ONE, TWO,
};
use crate::domain::FixedPoint;
use crate::error::{AmmError, Result};

/// Floor geometric mean of two normalized balances, `sqrt(x0 * x1)`.
///
/// # Errors
///
/// [`AmmError::ArithmeticOverflow`] if the product does not fit.
pub fn geometric_mean(balances: &[FixedPoint; N_COINS]) -> Result<FixedPoint> {
    Ok(balances[0].safe_mul(&balances[1])?.isqrt())
}

/// Rejects balances outside the range the Newton step is stable in.
fn check_balances(x: &[FixedPoint; N_COINS]) -> Result<()> {
    if x[0] < MIN_X0 || x[0] > MAX_X0 {
        return Err(AmmError::UnsafeValue("solve_d: largest balance out of range"));
    }
    for xi in &x[1..] {
        if xi.safe_mul(&ONE)?.safe_div(&x[0])? < MIN_BALANCE_RATIO {
            return Err(AmmError::UnsafeValue("solve_d: balance ratio too skewed"));
        }
    }
    Ok(())
}

/// Computes the invariant `D` for normalized, price-scaled balances.
///
/// `ann` is the amplification coefficient in contract units (`A * A_MULTIPLIER`
/// scaled as stored on chain) and `gamma` the curvature coefficient.
/// Balance order does not matter; they are sorted descending internally.
///
/// # Errors
///
/// - [`AmmError::UnsafeValue`] if the largest balance is outside
///   `[1e9, 1e33]`, a balance is less than `1e-7` of the largest, or a
///   converged `balance * ONE / D` leaves `[1e16, 1e20]`.
/// - [`AmmError::DidNotConverge`] after 255 iterations.
/// - Arithmetic errors from any intermediate step.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::FixedPoint;
/// use crypto_swap_sim::math::solve_d;
///
/// let one = FixedPoint::ONE;
/// let d = solve_d(FixedPoint::from(4_000_000u64), FixedPoint::from(1_450_000_000_000_000u64), &[one, one]);
/// assert_eq!(d, Ok(FixedPoint::from_u128(2_000_000_000_000_000_000)));
/// ```
pub fn solve_d(
    ann: FixedPoint,
    gamma: FixedPoint,
    balances: &[FixedPoint; N_COINS],
) -> Result<FixedPoint> {
    let x = sort_desc(balances);
    check_balances(&x)?;

    let mut d = N.safe_mul(&geometric_mean(&x)?)?;
    let s = x[0].safe_add(&x[1])?;

    for iteration in 0..MAX_ITERATIONS {
        let d_prev = d;

        let mut k0 = ONE;
        for xi in &x {
            k0 = k0.safe_mul(xi)?.safe_mul(&N)?.safe_div(&d)?;
        }
        let g1k0 = fold_g1k0(gamma, k0)?;

        let mul1 = ONE
            .safe_mul(&d)?
            .safe_div(&gamma)?
            .safe_mul(&g1k0)?
            .safe_div(&gamma)?
            .safe_mul(&g1k0)?
            .safe_mul(&A_MULTIPLIER)?
            .safe_div(&ann)?;
        let mul2 = TWO
            .safe_mul(&ONE)?
            .safe_mul(&N)?
            .safe_mul(&k0)?
            .safe_div(&g1k0)?;

        let neg_fprime = s
            .safe_add(&s.safe_mul(&mul2)?.safe_div(&ONE)?)?
            .safe_add(&mul1.safe_mul(&N)?.safe_div(&k0)?)?
            .safe_sub(&mul2.safe_mul(&d)?.safe_div(&ONE)?)?;

        let d_plus = d.safe_mul(&neg_fprime.safe_add(&s)?)?.safe_div(&neg_fprime)?;
        let mut d_minus = d.safe_mul(&d)?.safe_div(&neg_fprime)?;
        let correction = d.safe_mul(&mul1.safe_div(&neg_fprime)?)?.safe_div(&ONE)?;
        if ONE > k0 {
            let term = correction.safe_mul(&ONE.safe_sub(&k0)?)?.safe_div(&k0)?;
            d_minus = d_minus.safe_add(&term)?;
        } else {
            let term = correction.safe_mul(&k0.safe_sub(&ONE)?)?.safe_div(&k0)?;
            d_minus = d_minus.safe_sub(&term)?;
        }

        // Overshoot branch halves instead of stepping.
        d = if d_plus > d_minus {
            d_plus.safe_sub(&d_minus)?
        } else {
            d_minus.safe_sub(&d_plus)?.safe_div(&TWO)?
        };

        let diff = d.abs_diff(&d_prev);
        if diff.safe_mul(&CONVERGENCE_SCALE)? < MIN_D_TOLERANCE.max(d) {
            for xi in &x {
                let frac = xi.safe_mul(&ONE)?.safe_div(&d)?;
                if frac < MIN_BALANCE_FRAC || frac > MAX_BALANCE_FRAC {
                    return Err(AmmError::UnsafeValue("solve_d: balance fraction out of range"));
                }
            }
            trace!(iteration, d = %d, "solve_d converged");
            return Ok(d);
        }
    }

    Err(AmmError::DidNotConverge("solve_d"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fp(v: u128) -> FixedPoint {
        FixedPoint::from_u128(v)
    }

    fn ann() -> FixedPoint {
        fp(4_000_000)
    }

    fn gamma() -> FixedPoint {
        fp(1_450_000_000_000_000)
    }

    #[test]
    fn balanced_pool() {
        let one = FixedPoint::ONE;
        assert_eq!(solve_d(ann(), gamma(), &[one, one]), Ok(fp(2_000_000_000_000_000_000)));
    }

    #[test]
    fn reference_pool_balances() {
        let xp = [fp(8_466_391_136_317_679_557), fp(10_531_459_265_502_951_057)];
        assert_eq!(solve_d(ann(), gamma(), &xp), Ok(fp(18_973_521_177_677_971_082)));
    }

    #[test]
    fn order_independent() {
        let a = [fp(8_466_391_136_317_679_557), fp(10_531_459_265_502_951_057)];
        let b = [a[1], a[0]];
        assert_eq!(solve_d(ann(), gamma(), &a), solve_d(ann(), gamma(), &b));
    }

    #[test]
    fn imbalanced_pool() {
        let xp = [fp(500_000_000_000_000_000_000), fp(1_000_000_000_000_000_000_000)];
        assert_eq!(solve_d(ann(), gamma(), &xp), Ok(fp(1_437_329_192_603_545_502_247)));
    }

    #[test]
    fn largest_balance_too_small() {
        let xp = [fp(100_000_000), fp(100_000_000)];
        let Err(AmmError::UnsafeValue(_)) = solve_d(ann(), gamma(), &xp) else {
            panic!("expected UnsafeValue");
        };
    }

    #[test]
    fn largest_balance_too_large() {
        let huge = FixedPoint::from_raw(primitive_types::U256::exp10(34));
        let Err(AmmError::UnsafeValue(_)) = solve_d(ann(), gamma(), &[huge, huge]) else {
            panic!("expected UnsafeValue");
        };
    }

    #[test]
    fn ratio_too_skewed() {
        let xp = [FixedPoint::ONE, fp(10_000_000)];
        let Err(AmmError::UnsafeValue(_)) = solve_d(ann(), gamma(), &xp) else {
            panic!("expected UnsafeValue");
        };
    }

    #[test]
    fn converged_fraction_out_of_range() {
        let xp = [fp(1_000_000_000_000_000_000_000), fp(1_000_000_000_000_000)];
        assert_eq!(
            solve_d(ann(), gamma(), &xp),
            Err(AmmError::UnsafeValue("solve_d: balance fraction out of range"))
        );
    }

    #[test]
    fn geometric_mean_exact() {
        assert_eq!(geometric_mean(&[fp(4), fp(9)]), Ok(fp(6)));
        assert_eq!(geometric_mean(&[fp(2), fp(3)]), Ok(fp(2)));
    }
}
