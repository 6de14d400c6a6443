//! Mutable snapshot of a crypto-invariant pool.

use serde::{Deserialize, Serialize};

use super::{Amount, FixedPoint, PackedPrices};
use crate::error::{AmmError, Result};
use crate::math::N_COINS;

/// Parameters of the price-scale rebalancing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceParams {
    /// Profit margin above which a rebalance is attempted.
    pub allowed_extra_profit: FixedPoint,
    /// Minimum oracle/scale deviation (and size of one nudge).
    pub adjustment_step: FixedPoint,
    /// Half-life of the price oracle in seconds.
    pub ma_half_time: u64,
}

/// Everything a swap reads and writes.
///
/// The snapshot is created from tracker data, replaced wholesale by each
/// successful commit and exported unchanged by
/// [`SwapPool::snapshot`](crate::traits::SwapPool::snapshot). Every field
/// round-trips through serde exactly; 256-bit words are decimal strings.
///
/// `future_time` doubles as a state flag: `0` means no pending ramp or
/// adjustment, `1` marks an adjustment that has just completed, and any
/// larger value is the timestamp at which the pending change ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Raw balances, asset `0` first.
    pub balances: [Amount; N_COINS],
    /// Last stored invariant.
    pub d: FixedPoint,
    /// Internal price of asset `1` in asset `0`.
    pub price_scale: PackedPrices,
    /// Last realized trade price.
    pub last_prices: PackedPrices,
    /// EMA of `last_prices`.
    pub price_oracle: PackedPrices,
    /// Total LP token supply.
    pub lp_supply: FixedPoint,
    /// Accumulated profit metric.
    pub xcp_profit: FixedPoint,
    /// Value of one LP token in `xcp` terms.
    pub virtual_price: FixedPoint,
    /// Rebalance tuning.
    pub rebalance: RebalanceParams,
    /// Set once profit allows rebalancing, cleared on a refused nudge.
    pub not_adjusted: bool,
    /// Timestamp of the last oracle update.
    pub last_prices_timestamp: u64,
    /// Ramp end timestamp or sentinel (`0` idle, `1` just adjusted).
    #[serde(default)]
    pub future_time: u64,
}

impl PoolState {
    /// Validates fields the orchestrator divides by or unpacks.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.lp_supply.is_zero() {
            return Err(AmmError::InvalidSnapshot("lp_supply must be greater than zero"));
        }
        if self.price_scale.get(0).is_zero() {
            return Err(AmmError::InvalidSnapshot("price_scale must be non-zero"));
        }
        if self.price_oracle.get(0).is_zero() {
            return Err(AmmError::InvalidSnapshot("price_oracle must be non-zero"));
        }
        if self.rebalance.ma_half_time == 0 {
            return Err(AmmError::InvalidSnapshot("ma_half_time must be greater than zero"));
        }
        Ok(())
    }
}
