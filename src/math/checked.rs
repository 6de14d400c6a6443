//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait turns the `Option`-returning `checked_*`
//! methods of the wrappers into [`Result<Self, AmmError>`](crate::error::AmmError)
//! so that solver code can chain operations with `?`.
//!
//! All operations act on the raw representation: `a.safe_mul(&b)` is the
//! plain integer product, not a rescaled fixed-point product. This mirrors
//! how the pool contract spells its formulas (`10**18 * D / gamma`).
//!
//! # Implementations
//!
//! - [`FixedPoint`]: normalized balances, prices and curve quantities
//! - [`Amount`]: raw token balances
//!
//! # Examples
//!
//! ```
//! use crypto_swap_sim::domain::FixedPoint;
//! use crypto_swap_sim::math::CheckedArithmetic;
//!
//! let d = FixedPoint::from(10u64);
//! let r = FixedPoint::ONE.safe_mul(&d).and_then(|v| v.safe_div(&FixedPoint::from(4u64)));
//! assert!(r.is_ok());
//! ```

use crate::domain::{Amount, FixedPoint};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns [`Result<Self, AmmError>`] with a specific error
/// variant so callers can distinguish overflow from underflow from
/// division by zero.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past `2^256 - 1`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticUnderflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past `2^256 - 1`.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Floor division.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivideByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError>;
}

// ---------------------------------------------------------------------------
// FixedPoint
// ---------------------------------------------------------------------------

impl CheckedArithmetic for FixedPoint {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("fixed-point addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticUnderflow("fixed-point subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::ArithmeticOverflow("fixed-point multiplication"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_div(other).ok_or(AmmError::DivideByZero)
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("amount addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticUnderflow("amount subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::ArithmeticOverflow("amount multiplication"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_div(other).ok_or(AmmError::DivideByZero)
    }
}
