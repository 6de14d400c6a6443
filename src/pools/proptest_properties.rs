//! Property-based tests using `proptest` for simulator invariants.
//!
//! 1. **Packed prices**: `unpack(pack(v)) == v` for all 128-bit values.
//! 2. **Fee bounds**: the dynamic fee stays within `[min_fee, max_fee]`.
//! 3. **Solver agreement**: `solve_y` at `solve_d(xp)` recovers `xp[j]`.
//! 4. **Quote determinism**: repeated quotes agree and leave state alone.
//! 5. **Atomic commits**: a rejected commit leaves the snapshot unchanged.
//! 6. **No loss**: virtual price never falls across successful commits.

use proptest::prelude::*;

use crate::config::crypto::tests::REFERENCE_JSON;
use crate::config::CryptoPoolConfig;
use crate::domain::{Amount, Clock, FixedPoint, PackedPrices};
use crate::math::{dynamic_fee, solve_d, solve_y};
use crate::pools::CryptoPool;
use crate::traits::{FromConfig, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const NOW: u64 = 1_709_620_000;

fn make_pool() -> CryptoPool {
    let Ok(cfg) = CryptoPoolConfig::from_json(REFERENCE_JSON) else {
        panic!("valid reference config");
    };
    let Ok(pool) = CryptoPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool.with_clock(Clock::Fixed(NOW))
}

/// Reference pool with no pending ramp, so every commit runs the loss check.
fn idle_pool(allowed_extra_profit: Option<FixedPoint>) -> CryptoPool {
    let pool = make_pool();
    let mut state = pool.snapshot();
    state.future_time = 0;
    if let Some(profit) = allowed_extra_profit {
        state.rebalance.allowed_extra_profit = profit;
    }
    let Ok(idle) = CryptoPool::new(*pool.curve(), *pool.assets(), state) else {
        panic!("valid state");
    };
    idle.with_clock(Clock::Fixed(NOW))
}

fn reference_ann() -> FixedPoint {
    FixedPoint::from(4_000_000u64)
}

fn reference_gamma() -> FixedPoint {
    FixedPoint::from(1_450_000_000_000_000u64)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Sizes of asset `0` sold into the reference pool, 0.001 to 0.5 tokens.
fn sell_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000u128..=500_000_000_000_000_000u128
}

/// Normalized balances with a skew in `[0.8, 1.25]`.
fn balances_strategy() -> impl Strategy<Value = [FixedPoint; 2]> {
    (
        100_000_000_000_000_000u128..=1_000_000_000_000_000_000_000u128,
        80u128..=125u128,
    )
        .prop_map(|(x0, pct)| [FixedPoint::from_u128(x0), FixedPoint::from_u128(x0 / 100 * pct)])
}

// ---------------------------------------------------------------------------
// Property 1: Packed prices
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_packed_round_trip(a in any::<u128>(), b in any::<u128>()) {
        let prices = [FixedPoint::from_u128(a), FixedPoint::from_u128(b)];
        let Ok(packed) = PackedPrices::pack(&prices) else {
            return Err(TestCaseError::fail("128-bit values must pack"));
        };
        prop_assert_eq!(packed.unpack::<2>(), prices);
        let Ok(again) = PackedPrices::pack(&packed.unpack::<2>()) else {
            return Err(TestCaseError::fail("repack failed"));
        };
        prop_assert_eq!(again, packed);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Fee bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fee_within_bounds(
        min_fee in 0u64..=50_000,
        spread in 0u64..=50_000,
        fee_gamma in 1u64..=1_000_000_000_000_000_000,
        x in 0u128..=1_000_000_000_000_000_000_000_000,
        y in 1u128..=1_000_000_000_000_000_000_000_000,
    ) {
        let max_fee = min_fee + spread;
        let Ok(fee) = dynamic_fee(
            FixedPoint::from(min_fee),
            FixedPoint::from(max_fee),
            FixedPoint::from(fee_gamma),
            FixedPoint::from_u128(x),
            FixedPoint::from_u128(y),
        ) else {
            return Err(TestCaseError::fail("fee must compute"));
        };
        prop_assert!(fee >= FixedPoint::from(min_fee), "fee {} below min {}", fee, min_fee);
        prop_assert!(fee <= FixedPoint::from(max_fee), "fee {} above max {}", fee, max_fee);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Solver agreement
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_solve_y_recovers_balance(xp in balances_strategy(), target in 0usize..2) {
        let Ok(d) = solve_d(reference_ann(), reference_gamma(), &xp) else {
            return Err(TestCaseError::fail("solve_d must converge in range"));
        };
        let Ok(y) = solve_y(reference_ann(), reference_gamma(), &xp, d, target) else {
            return Err(TestCaseError::fail("solve_y must converge in range"));
        };
        let expected = xp[target];
        let diff = y.abs_diff(&expected);
        // relative error below 1e-6
        let Some(scaled) = diff.checked_mul(&FixedPoint::from(1_000_000u64)) else {
            return Err(TestCaseError::fail("overflow"));
        };
        prop_assert!(scaled <= expected, "y={} expected={}", y, expected);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Quote determinism
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_is_deterministic(asset_in in 0usize..2, seed in any::<u64>()) {
        let pool = make_pool();
        let lo: u128 = if asset_in == 0 { 1_000_000_000_000_000 } else { 1_000_000 };
        let dx = lo + u128::from(seed) % (lo * 100);
        let before = pool.snapshot();
        let first = pool.quote(asset_in, 1 - asset_in, Amount::new(dx));
        let second = pool.quote(asset_in, 1 - asset_in, Amount::new(dx));
        prop_assert_eq!(first, second);
        prop_assert_eq!(pool.snapshot(), before);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Atomic commits
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rejected_commit_preserves_state(
        dx in sell_strategy(),
        greed in 101u128..=300,
    ) {
        let mut pool = idle_pool(None);
        let Ok(q) = pool.quote(0, 1, Amount::new(dx)) else {
            return Ok(());
        };
        // Withdraw more than the gross output, fee included.
        let gross = u128::from(q.amount_out().get().low_u64()) + u128::from(q.fee().get().low_u64());
        let inflated = Amount::new(gross * greed / 100);
        let before = pool.snapshot();
        let result = pool.commit(0, 1, q.amount_in(), inflated);
        prop_assert!(result.is_err(), "overpaying commit accepted");
        prop_assert_eq!(pool.snapshot(), before);
    }
}

// ---------------------------------------------------------------------------
// Property 6: No loss across successful commits
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_virtual_price_non_decreasing(
        trades in prop::collection::vec((0usize..2, any::<u64>()), 1..8),
    ) {
        // No rebalancing: only the fee moves the virtual price.
        let mut pool = idle_pool(Some(FixedPoint::from_u128(1_000_000_000_000_000_000_000)));

        let mut previous = pool.snapshot().virtual_price;
        for (step, (asset_in, seed)) in trades.into_iter().enumerate() {
            let lo: u128 = if asset_in == 0 { 1_000_000_000_000_000 } else { 1_000_000 };
            let dx = lo + u128::from(seed) % (lo * 100);
            let now = NOW + 30 * step as u64;
            let Ok(q) = pool.quote_at(asset_in, 1 - asset_in, Amount::new(dx), now) else {
                continue;
            };
            if pool.commit_at(asset_in, 1 - asset_in, q.amount_in(), q.amount_out(), now).is_ok() {
                let current = pool.snapshot().virtual_price;
                prop_assert!(current >= previous, "virtual price fell: {} -> {}", previous, current);
                previous = current;
            }
        }
    }
}
