//! Two-asset crypto-invariant pool (Curve V2 / Aqua style).
//!
//! Balances are normalized to 18 decimals and asset `1` is scaled by the
//! internal `price_scale`, so the invariant always sees two comparable
//! coordinates:
//!
//! ```text
//! xp[0] = balance[0] · prec[0]
//! xp[1] = balance[1] · prec[1] · price_scale / 1e18
//! ```
//!
//! A quote solves for the output coordinate with [`solve_y`] at the stored
//! invariant and charges the dynamic fee on the post-trade coordinates. A
//! commit updates balances and runs the rebalance step: oracle EMA,
//! unadjusted invariant, last trade price, virtual price with its no-loss
//! guard, and an optional nudge of `price_scale` toward the oracle.

use tracing::{debug, warn};

use crate::config::CryptoPoolConfig;
use crate::domain::{
    Amount, AssetConfig, Clock, CurveParams, FixedPoint, PackedPrices, PoolState, SwapQuote,
};
use crate::error::{AmmError, CommitError, QuoteError, Result};
use crate::math::{
    fixed, geometric_mean, solve_d, solve_y, update_price_oracle, CheckedArithmetic,
    FEE_DENOMINATOR, N_COINS, ONE, TWO,
};
use crate::traits::{FromConfig, SwapPool};

/// Trades at or below this raw size do not set `last_prices` directly.
const MIN_PRICED_TRADE: Amount = Amount::new(100_000);

/// Relative size of the probe trade used when a trade is too small to price.
const PRICE_PROBE_DIVISOR: FixedPoint = FixedPoint::from_u128(1_000_000);

/// Which branch the rebalance step took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rebalance {
    /// No adjustment attempted.
    Plain,
    /// `price_scale` moved toward the oracle.
    Adjusted,
    /// Adjustment attempted but refused; `not_adjusted` cleared.
    Refused,
}

/// Crypto-invariant pool simulator.
///
/// Holds the static curve and asset parameters, the mutable [`PoolState`]
/// and a [`Clock`] supplying "now". Use [`quote_at`](Self::quote_at) and
/// [`commit_at`](Self::commit_at) to pass timestamps explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoPool {
    curve: CurveParams,
    assets: [AssetConfig; N_COINS],
    state: PoolState,
    clock: Clock,
}

fn word(amount: Amount) -> FixedPoint {
    FixedPoint::from_raw(amount.get())
}

fn amount(value: FixedPoint) -> Amount {
    Amount::from_raw(value.raw())
}

/// `xcp` of a balanced pool with invariant `d` at `price_scale`.
fn xcp(d: FixedPoint, price_scale: FixedPoint) -> Result<FixedPoint> {
    let x0 = d.safe_div(&TWO)?;
    let x1 = d.safe_mul(&ONE)?.safe_div(&TWO.safe_mul(&price_scale)?)?;
    geometric_mean(&[x0, x1])
}

fn check_pair(asset_in: usize, asset_out: usize) -> Result<()> {
    if asset_in >= N_COINS || asset_out >= N_COINS {
        return Err(AmmError::InvalidAsset("asset index out of range"));
    }
    if asset_in == asset_out {
        return Err(AmmError::InvalidAsset("asset_in equals asset_out"));
    }
    Ok(())
}

impl CryptoPool {
    /// Creates a pool with the system clock.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] if any parameter fails validation.
    pub fn new(curve: CurveParams, assets: [AssetConfig; N_COINS], state: PoolState) -> Result<Self> {
        curve.validate()?;
        for asset in &assets {
            asset.validate()?;
        }
        state.validate()?;
        Ok(Self {
            curve,
            assets,
            state,
            clock: Clock::System,
        })
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> Clock {
        self.clock
    }

    /// Returns the curve parameters.
    #[must_use]
    pub const fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// Returns the per-asset configuration.
    #[must_use]
    pub const fn assets(&self) -> &[AssetConfig; N_COINS] {
        &self.assets
    }

    /// Borrows the current snapshot.
    #[must_use]
    pub const fn state(&self) -> &PoolState {
        &self.state
    }

    fn normalize(&self, balances: &[Amount; N_COINS], price_scale: FixedPoint) -> Result<[FixedPoint; N_COINS]> {
        let x0 = word(balances[0]).safe_mul(&self.assets[0].precision_multiplier)?;
        let x1 = word(balances[1])
            .safe_mul(&self.assets[1].precision_multiplier)?
            .safe_mul(&price_scale)?
            .safe_div(&ONE)?;
        Ok([x0, x1])
    }

    fn denormalize(&self, index: usize, value: FixedPoint, price_scale: FixedPoint) -> Result<Amount> {
        let precision = self.assets[index].precision_multiplier;
        let raw = if index == 0 {
            value.safe_div(&precision)?
        } else {
            value
                .safe_mul(&ONE)?
                .safe_div(&price_scale.safe_mul(&precision)?)?
        };
        Ok(amount(raw))
    }

    /// Quotes a swap at an explicit timestamp.
    ///
    /// The stored invariant is used unless a ramp or adjustment is pending
    /// (`future_time > now`), in which case it is recomputed from the
    /// current balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] / [`AmmError::InvalidQuantity`] on bad input.
    /// - [`AmmError::InsufficientLiquidity`] if the output rounds to zero.
    /// - Solver and arithmetic errors, unchanged.
    pub fn quote_at(
        &self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
        now: u64,
    ) -> Result<SwapQuote> {
        check_pair(asset_in, asset_out)?;
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_in must be positive"));
        }

        let (a, gamma) = self.curve.a_gamma(now)?;
        let price_scale = self.state.price_scale.get(0);
        let mut balances = self.state.balances;

        // Pre-trade balances: the trade itself must not move the invariant.
        let d = if self.state.future_time > now {
            solve_d(a, gamma, &self.normalize(&balances, price_scale)?)?
        } else {
            self.state.d
        };

        balances[asset_in] = balances[asset_in].safe_add(&amount_in)?;
        let mut xp = self.normalize(&balances, price_scale)?;
        let y = solve_y(a, gamma, &xp, d, asset_out)?;
        let y_floor = y.safe_add(&FixedPoint::from(1u64))?;
        if y_floor >= xp[asset_out] {
            return Err(AmmError::InsufficientLiquidity);
        }
        let dy = self.denormalize(asset_out, xp[asset_out].safe_sub(&y_floor)?, price_scale)?;
        xp[asset_out] = y;

        let fee_rate = self.assets[asset_in]
            .swap_fee
            .fee(xp[asset_in], xp[asset_out])?;
        let fee = amount(word(dy).safe_mul(&fee_rate)?.safe_div(&FEE_DENOMINATOR)?);
        let amount_out = dy.safe_sub(&fee)?;
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        debug!(
            asset_in,
            asset_out,
            amount_in = %amount_in,
            amount_out = %amount_out,
            fee = %fee,
            fee_rate = %fee_rate,
            "quote computed"
        );
        SwapQuote::new(amount_in, amount_out, fee)
    }

    /// Commits a swap at an explicit timestamp.
    ///
    /// Runs on a copy of the snapshot; the pool state is replaced only if
    /// every step succeeds.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] on bad indices.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` exceeds the reserve.
    /// - [`AmmError::Loss`] if the virtual price would decrease.
    /// - Solver and arithmetic errors, unchanged.
    pub fn commit_at(
        &mut self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
        amount_out: Amount,
        now: u64,
    ) -> Result<()> {
        check_pair(asset_in, asset_out)?;
        let mut next = self.state.clone();
        match self.apply_trade(&mut next, asset_in, asset_out, amount_in, amount_out, now) {
            Ok(outcome) => {
                debug!(
                    ?outcome,
                    d = %next.d,
                    virtual_price = %next.virtual_price,
                    xcp_profit = %next.xcp_profit,
                    price_scale = %next.price_scale,
                    "commit applied"
                );
                self.state = next;
                Ok(())
            }
            Err(err) => {
                warn!(%err, asset_in, asset_out, amount_in = %amount_in, amount_out = %amount_out, "commit rejected");
                Err(err)
            }
        }
    }

    fn apply_trade(
        &self,
        state: &mut PoolState,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
        amount_out: Amount,
        now: u64,
    ) -> Result<Rebalance> {
        if state.future_time > 1 && now >= state.future_time {
            state.future_time = 1;
        }

        state.balances[asset_in] = state.balances[asset_in].safe_add(&amount_in)?;
        state.balances[asset_out] = state.balances[asset_out]
            .checked_sub(&amount_out)
            .ok_or(AmmError::InsufficientLiquidity)?;

        let price_scale = state.price_scale.get(0);
        let xp = self.normalize(&state.balances, price_scale)?;

        let mut trade_price = None;
        if amount_in > MIN_PRICED_TRADE && amount_out > MIN_PRICED_TRADE {
            let dx = word(amount_in).safe_mul(&self.assets[asset_in].precision_multiplier)?;
            let dy = word(amount_out).safe_mul(&self.assets[asset_out].precision_multiplier)?;
            // Price of asset 1 in asset 0 either way.
            let p = if asset_in == 0 {
                dx.safe_mul(&ONE)?.safe_div(&dy)?
            } else {
                dy.safe_mul(&ONE)?.safe_div(&dx)?
            };
            trade_price = Some(p).filter(|p| !p.is_zero());
        }

        let (a, gamma) = self.curve.a_gamma(now)?;
        tweak_price(state, a, gamma, &xp, trade_price, now)
    }
}

/// Oracle update, virtual-price accounting and the optional scale nudge.
fn tweak_price(
    state: &mut PoolState,
    a: FixedPoint,
    gamma: FixedPoint,
    xp: &[FixedPoint; N_COINS],
    trade_price: Option<FixedPoint>,
    now: u64,
) -> Result<Rebalance> {
    let price_scale = state.price_scale.get(0);
    let mut price_oracle = state.price_oracle.get(0);

    if state.last_prices_timestamp < now {
        price_oracle = update_price_oracle(
            price_oracle,
            state.last_prices.get(0),
            now - state.last_prices_timestamp,
            state.rebalance.ma_half_time,
        )?;
        state.price_oracle = PackedPrices::pack(&[price_oracle])?;
        state.last_prices_timestamp = now;
    }

    let d_unadjusted = solve_d(a, gamma, xp)?;

    let last_price = match trade_price {
        Some(p) => p,
        None => {
            let probe = xp[0].safe_div(&PRICE_PROBE_DIVISOR)?;
            let shifted = [xp[0].safe_add(&probe)?, xp[1]];
            let y = solve_y(a, gamma, &shifted, d_unadjusted, 1)?;
            price_scale
                .safe_mul(&probe)?
                .safe_div(&xp[1].safe_sub(&y)?)?
        }
    };
    state.last_prices = PackedPrices::pack(&[last_price])?;

    let old_virtual_price = state.virtual_price;
    let mut virtual_price = ONE;
    let mut xcp_profit = ONE;
    if !old_virtual_price.is_zero() {
        virtual_price = ONE
            .safe_mul(&xcp(d_unadjusted, price_scale)?)?
            .safe_div(&state.lp_supply)?;
        xcp_profit = state
            .xcp_profit
            .safe_mul(&virtual_price)?
            .safe_div(&old_virtual_price)?;
        if virtual_price < old_virtual_price && state.future_time == 0 {
            return Err(AmmError::Loss);
        }
        if state.future_time == 1 {
            state.future_time = 0;
        }
    }
    state.xcp_profit = xcp_profit;

    // 2·vp − 1 > xcp_profit + 2·allowed_extra_profit
    let mut needs_adjustment = state.not_adjusted;
    let doubled_extra = state.rebalance.allowed_extra_profit.safe_mul(&TWO)?;
    if virtual_price.safe_mul(&TWO)? > xcp_profit.safe_add(&doubled_extra)?.safe_add(&ONE)? {
        needs_adjustment = true;
        state.not_adjusted = true;
    }

    let mut outcome = Rebalance::Plain;
    if needs_adjustment {
        let step = state.rebalance.adjustment_step;
        let deviation = price_oracle
            .safe_mul(&ONE)?
            .safe_div(&price_scale)?
            .abs_diff(&ONE);
        let norm = deviation.safe_mul(&deviation)?;

        if norm > step.safe_mul(&step)? && !old_virtual_price.is_zero() {
            let norm = fixed::int_sqrt(norm.safe_div(&ONE)?)?;
            let price_scale_new = price_scale
                .safe_mul(&norm.safe_sub(&step)?)?
                .safe_add(&step.safe_mul(&price_oracle)?)?
                .safe_div(&norm)?;

            let candidate = [
                xp[0],
                xp[1].safe_mul(&price_scale_new)?.safe_div(&price_scale)?,
            ];
            let d = solve_d(a, gamma, &candidate)?;
            let new_virtual_price = ONE
                .safe_mul(&xcp(d, price_scale_new)?)?
                .safe_div(&state.lp_supply)?;

            if new_virtual_price > ONE
                && new_virtual_price.safe_mul(&TWO)? > xcp_profit.safe_add(&ONE)?
            {
                state.price_scale = PackedPrices::pack(&[price_scale_new])?;
                state.d = d;
                state.virtual_price = new_virtual_price;
                return Ok(Rebalance::Adjusted);
            }
            state.not_adjusted = false;
            outcome = Rebalance::Refused;
        }
    }

    state.d = d_unadjusted;
    state.virtual_price = virtual_price;
    Ok(outcome)
}

impl FromConfig<CryptoPoolConfig> for CryptoPool {
    /// Builds a pool from a validated configuration, using the system clock.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`CryptoPoolConfig::validate`].
    fn from_config(config: &CryptoPoolConfig) -> Result<Self> {
        config.validate()?;
        Self::new(*config.curve(), *config.assets(), config.state().clone())
    }
}

impl SwapPool for CryptoPool {
    fn quote(
        &self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
    ) -> core::result::Result<SwapQuote, QuoteError> {
        self.quote_at(asset_in, asset_out, amount_in, self.clock.now())
    }

    fn commit(
        &mut self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
        amount_out: Amount,
    ) -> core::result::Result<(), CommitError> {
        let now = self.clock.now();
        self.commit_at(asset_in, asset_out, amount_in, amount_out, now)
    }

    fn snapshot(&self) -> PoolState {
        self.state.clone()
    }
}
