//! Unified error types for the simulator.
//!
//! Every fallible operation in the crate returns [`AmmError`]. Quoting and
//! committing share the same taxonomy; [`QuoteError`] and [`CommitError`]
//! are aliases kept for call-site readability.

use thiserror::Error;

/// Errors raised by the arithmetic kernel, the solvers, snapshot decoding
/// and the swap orchestrator.
///
/// Variants carrying a `&'static str` name the operation that failed so
/// that a rejected quote can be traced back to the exact check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A 256-bit operation exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// A subtraction would have produced a negative value.
    #[error("arithmetic underflow: {0}")]
    ArithmeticUnderflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivideByZero,

    /// An input or intermediate value left the solver's safe operating range.
    #[error("unsafe value: {0}")]
    UnsafeValue(&'static str),

    /// An iterative routine exhausted its step budget.
    #[error("did not converge: {0}")]
    DidNotConverge(&'static str),

    /// The rebalance step would reduce the virtual price.
    #[error("loss: virtual price would decrease")]
    Loss,

    /// The pool snapshot is missing fields or holds malformed values.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),

    /// Asset index out of range, or input equals output.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// Zero or otherwise unusable trade amount.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// Reserves cannot cover the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Unknown pool type or inconsistent static parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Error returned by [`SwapPool::quote`](crate::traits::SwapPool::quote).
pub type QuoteError = AmmError;

/// Error returned by [`SwapPool::commit`](crate::traits::SwapPool::commit).
pub type CommitError = AmmError;
