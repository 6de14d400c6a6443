//! Value types of the simulator.
//!
//! Numeric newtypes ([`FixedPoint`], [`Amount`], [`PackedPrices`]) wrap a
//! 256-bit word; the remaining types group the static parameters and the
//! mutable snapshot of a pool.

mod amount;
mod clock;
mod curve_params;
mod fee_params;
mod fixed_point;
mod packed_prices;
mod pool_state;
mod swap_quote;

pub use amount::Amount;
pub use clock::Clock;
pub use curve_params::{CurveParams, CurveRamp};
pub use fee_params::{AssetConfig, DynamicFee};
pub use fixed_point::FixedPoint;
pub use packed_prices::{PackedPrices, MAX_SLOTS};
pub use pool_state::{PoolState, RebalanceParams};
pub use swap_quote::SwapQuote;
