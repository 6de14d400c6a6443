//! Capability interface shared by every simulated pool family.
//!
//! [`SwapPool`] mirrors the split between the contract's `view` quoting and
//! its state-changing execution:
//!
//! 1. **Quote**: [`SwapPool::quote`] prices a trade without touching state.
//! 2. **Commit**: [`SwapPool::commit`] applies a previously quoted trade.
//! 3. **Export**: [`SwapPool::snapshot`] hands the current state back to the
//!    tracker for persistence.
//!
//! # Concurrency
//!
//! `quote` takes `&self`, so any number of threads may quote against a
//! shared pool. `commit` takes `&mut self`; callers serialize commits per
//! pool (single owner or a mutex).
//!
//! # Atomicity
//!
//! A failed `commit` leaves the snapshot exactly as it was.

use crate::domain::{Amount, PoolState, SwapQuote};
use crate::error::{CommitError, QuoteError};

/// Core trait for simulated AMM pools.
///
/// Assets are addressed by index (`0` or `1` for two-asset pools).
///
/// # Errors
///
/// Common error variants include:
///
/// - [`AmmError::InvalidAsset`](crate::error::AmmError::InvalidAsset): index out of range or `asset_in == asset_out`
/// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity): output rounds to nothing or exceeds reserves
/// - [`AmmError::UnsafeValue`](crate::error::AmmError::UnsafeValue) / [`AmmError::DidNotConverge`](crate::error::AmmError::DidNotConverge): solver rejections
/// - [`AmmError::Loss`](crate::error::AmmError::Loss): commit would lower the virtual price
pub trait SwapPool {
    /// Prices selling `amount_in` of `asset_in` for `asset_out`.
    ///
    /// Side-effect free. The returned fee is in output units and already
    /// deducted from `amount_out`.
    ///
    /// # Errors
    ///
    /// Any kernel or solver failure, surfaced verbatim.
    fn quote(
        &self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
    ) -> Result<SwapQuote, QuoteError>;

    /// Applies a trade previously priced by [`quote`](Self::quote).
    ///
    /// The linkage to the quote is not re-validated.
    ///
    /// # Errors
    ///
    /// Any failure of the rebalance procedure; the state is left untouched.
    fn commit(
        &mut self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<(), CommitError>;

    /// Returns a copy of the current snapshot.
    #[must_use]
    fn snapshot(&self) -> PoolState;
}
