//! Arithmetic kernel and Newton solvers for the crypto-invariant curve.
//!
//! Everything here is a pure function over [`FixedPoint`] words with
//! checked arithmetic: overflow, underflow and division by zero surface as
//! [`AmmError`](crate::error::AmmError) variants, never as wrapped values.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`fixed`] | scaled `mul`/`div` with rounding, fixed-point `int_sqrt` |
//! | [`CheckedArithmetic`] | raw-word checked ops chained with `?` |
//! | [`solve_d`] | invariant `D` from balances |
//! | [`solve_y`] | one balance from `D` and the others |
//! | [`halfpow`], [`update_price_oracle`] | EMA decay |
//! | [`dynamic_fee`] | skew-dependent fee |
//! | [`decimal`] | serde adapter for 256-bit words |

mod checked;
mod counter_balance;
pub mod decimal;
mod fee;
pub mod fixed;
mod invariant;
mod oracle;

use primitive_types::U256;

pub use checked::CheckedArithmetic;
pub use counter_balance::solve_y;
pub use fee::dynamic_fee;
pub use invariant::{geometric_mean, solve_d};
pub use oracle::{halfpow, update_price_oracle};

use crate::domain::FixedPoint;
use crate::error::Result;

/// Number of assets in a pool.
pub const N_COINS: usize = 2;

/// `1.0` in fixed point.
pub const ONE: FixedPoint = FixedPoint::ONE;

/// Raw integer `2`, for halving and doubling.
pub(crate) const TWO: FixedPoint = FixedPoint::from_u128(2);

/// [`N_COINS`] as a raw word.
pub(crate) const N: FixedPoint = FixedPoint::from_u128(N_COINS as u128);

/// Scale applied to `A` on chain.
pub const A_MULTIPLIER: FixedPoint = FixedPoint::from_u128(10_000);

/// Denominator of fee values (`1000` = 1%).
pub const FEE_DENOMINATOR: FixedPoint = FixedPoint::from_u128(100_000);

/// Width in bits of one packed price slot.
pub const PRICE_SIZE: usize = 128;

/// Mask selecting one packed price slot.
pub const PRICE_MASK: U256 = U256([u64::MAX, u64::MAX, 0, 0]);

/// Newton step budget for `solve_d` and `solve_y`.
pub const MAX_ITERATIONS: usize = 255;

/// Iteration budget for `int_sqrt` and the `halfpow` series.
pub const MAX_SQRT_ITERATIONS: usize = 256;

/// Series cut-off used by the price oracle.
pub const HALFPOW_PRECISION: FixedPoint = FixedPoint::from_u128(10_000_000_000);

pub(crate) const MIN_X0: FixedPoint = FixedPoint::from_u128(1_000_000_000);
pub(crate) const MAX_X0: FixedPoint =
    FixedPoint::from_u128(1_000_000_000_000_000_000_000_000_000_000_000);
pub(crate) const MIN_BALANCE_RATIO: FixedPoint = FixedPoint::from_u128(100_000_000_000);
pub(crate) const MIN_BALANCE_FRAC: FixedPoint = FixedPoint::from_u128(10_000_000_000_000_000);
pub(crate) const MAX_BALANCE_FRAC: FixedPoint =
    FixedPoint::from_u128(100_000_000_000_000_000_000);
pub(crate) const CONVERGENCE_SCALE: FixedPoint = FixedPoint::from_u128(100_000_000_000_000);
pub(crate) const MIN_D_TOLERANCE: FixedPoint = FixedPoint::from_u128(10_000_000_000_000_000);

/// `|gamma + 1 - K0| + 1`, keeping the sign branch of the contract.
pub(crate) fn fold_g1k0(gamma: FixedPoint, k0: FixedPoint) -> Result<FixedPoint> {
    let g1k0 = gamma.safe_add(&ONE)?;
    if g1k0 > k0 {
        g1k0.safe_sub(&k0)?.safe_add(&ONE_WEI)
    } else {
        k0.safe_sub(&g1k0)?.safe_add(&ONE_WEI)
    }
}

const ONE_WEI: FixedPoint = FixedPoint::from_u128(1);

/// Sorts descending.
pub(crate) fn sort_desc(values: &[FixedPoint; N_COINS]) -> [FixedPoint; N_COINS] {
    let mut sorted = *values;
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}
