//! Newton-Raphson solver for a single balance given the invariant.

use tracing::trace;

use super::{
    fold_g1k0, sort_desc, CheckedArithmetic, A_MULTIPLIER, CONVERGENCE_SCALE, MAX_BALANCE_FRAC,
    MAX_ITERATIONS, MIN_BALANCE_FRAC, N, N_COINS, ONE, TWO,
};
use crate::domain::FixedPoint;
use crate::error::{AmmError, Result};

/// Solves for `balances[target]` such that the pool keeps invariant `d`.
///
/// The value currently stored at `target` is ignored. When the Newton
/// derivative turns non-positive, or a step would go negative, the previous
/// guess is halved instead.
///
/// # Errors
///
/// - [`AmmError::InvalidAsset`] if `target >= 2`.
/// - [`AmmError::DivideByZero`] if a known balance, the running guess, or
///   the derivative reaches zero.
/// - [`AmmError::UnsafeValue`] if the converged `y * ONE / d` leaves
///   `[1e16, 1e20]`.
/// - [`AmmError::DidNotConverge`] after 255 iterations.
pub fn solve_y(
    ann: FixedPoint,
    gamma: FixedPoint,
    balances: &[FixedPoint; N_COINS],
    d: FixedPoint,
    target: usize,
) -> Result<FixedPoint> {
    if target >= N_COINS {
        return Err(AmmError::InvalidAsset("solve_y: target index out of range"));
    }

    let mut others = *balances;
    others[target] = FixedPoint::ZERO;
    let others = sort_desc(&others);

    let hundred = FixedPoint::from(100u64);
    let convergence_limit = others[0]
        .safe_div(&CONVERGENCE_SCALE)?
        .max(d.safe_div(&CONVERGENCE_SCALE)?)
        .max(hundred);

    let mut y = d.safe_div(&N)?;
    let mut k0_i = ONE;
    let mut s_i = FixedPoint::ZERO;
    for j in 2..=N_COINS {
        let x = others[N_COINS - j];
        if x.is_zero() {
            return Err(AmmError::DivideByZero);
        }
        y = y.safe_mul(&d)?.safe_div(&x.safe_mul(&N)?)?;
        s_i = s_i.safe_add(&x)?;
    }
    for x in &others[..N_COINS - 1] {
        k0_i = k0_i.safe_mul(x)?.safe_mul(&N)?.safe_div(&d)?;
    }

    for iteration in 0..MAX_ITERATIONS {
        let y_prev = y;

        let k0 = k0_i.safe_mul(&y)?.safe_mul(&N)?.safe_div(&d)?;
        let s = s_i.safe_add(&y)?;
        let g1k0 = fold_g1k0(gamma, k0)?;

        let mul1 = ONE
            .safe_mul(&d)?
            .safe_div(&gamma)?
            .safe_mul(&g1k0)?
            .safe_div(&gamma)?
            .safe_mul(&g1k0.safe_mul(&A_MULTIPLIER)?)?
            .safe_div(&ann)?;
        let mul2 = TWO
            .safe_mul(&ONE)?
            .safe_mul(&k0)?
            .safe_div(&g1k0)?
            .safe_add(&ONE)?;

        let mut yfprime = ONE
            .safe_mul(&y)?
            .safe_add(&s.safe_mul(&mul2)?)?
            .safe_add(&mul1)?;
        let dyfprime = d.safe_mul(&mul2)?;
        if yfprime < dyfprime {
            y = y_prev.safe_div(&TWO)?;
            continue;
        }
        yfprime = yfprime.safe_sub(&dyfprime)?;

        let fprime = yfprime.safe_div(&y)?;
        let mut y_minus = mul1.safe_div(&fprime)?;
        let y_plus = yfprime
            .safe_add(&ONE.safe_mul(&d)?)?
            .safe_div(&fprime)?
            .safe_add(&y_minus.safe_mul(&ONE)?.safe_div(&k0)?)?;
        y_minus = y_minus.safe_add(&ONE.safe_mul(&s)?.safe_div(&fprime)?)?;

        y = if y_plus < y_minus {
            y_prev.safe_div(&TWO)?
        } else {
            y_plus.safe_sub(&y_minus)?
        };

        let diff = y.abs_diff(&y_prev);
        if diff < convergence_limit.max(y.safe_div(&CONVERGENCE_SCALE)?) {
            let frac = y.safe_mul(&ONE)?.safe_div(&d)?;
            if frac < MIN_BALANCE_FRAC || frac > MAX_BALANCE_FRAC {
                return Err(AmmError::UnsafeValue("solve_y: result fraction out of range"));
            }
            trace!(iteration, target, y = %y, "solve_y converged");
            return Ok(y);
        }
    }

    Err(AmmError::DidNotConverge("solve_y"))
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

    fn post_trade() -> [FixedPoint; 2] {
        [fp(9_466_391_136_317_679_557), fp(10_531_459_265_502_951_057)]
    }

    const D: u128 = 18_973_521_177_677_971_086;

    #[test]
    fn output_side_of_reference_swap() {
        assert_eq!(
            solve_y(ann(), gamma(), &post_trade(), fp(D), 1),
            Ok(fp(9_507_130_260_328_564_097))
        );
    }

    #[test]
    fn input_side_of_reference_swap() {
        assert_eq!(
            solve_y(ann(), gamma(), &post_trade(), fp(D), 0),
            Ok(fp(8_466_391_136_317_679_563))
        );
    }

    #[test]
    fn balanced_pool() {
        let one = FixedPoint::ONE;
        let d = fp(2_000_000_000_000_000_000);
        assert_eq!(solve_y(ann(), gamma(), &[one, one], d, 1), Ok(fp(1_000_000_000_000_000_001)));
    }

    #[test]
    fn target_value_is_ignored() {
        let mut xp = post_trade();
        xp[1] = FixedPoint::ONE;
        assert_eq!(
            solve_y(ann(), gamma(), &xp, fp(D), 1),
            Ok(fp(9_507_130_260_328_564_097))
        );
    }

    #[test]
    fn negative_derivative_halves_guess() {
        // Dust-sized pool where the first Newton step undershoots.
        let ann = fp(384_411_093);
        let gamma = fp(181_550_140_358);
        let d = fp(100_195);
        assert_eq!(solve_y(ann, gamma, &[fp(50_157), fp(1)], d, 1), Ok(fp(50_038)));
        assert_eq!(solve_y(ann, gamma, &[fp(1), fp(50_157)], d, 0), Ok(fp(50_038)));
    }

    #[test]
    fn result_fraction_out_of_range() {
        let one = FixedPoint::ONE;
        let d = fp(2_000_000_000_000_000_000_000);
        assert_eq!(
            solve_y(ann(), gamma(), &[one, one], d, 1),
            Err(AmmError::UnsafeValue("solve_y: result fraction out of range"))
        );
    }

    #[test]
    fn zero_known_balance() {
        let xp = [FixedPoint::ZERO, FixedPoint::ONE];
        assert_eq!(
            solve_y(ann(), gamma(), &xp, fp(D), 1),
            Err(AmmError::DivideByZero)
        );
    }

    #[test]
    fn target_out_of_range() {
        let Err(AmmError::InvalidAsset(_)) = solve_y(ann(), gamma(), &post_trade(), fp(D), 2)
        else {
            panic!("expected InvalidAsset");
        };
    }
}
