//! Outcome of a quote.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, FixedPoint};
use crate::error::AmmError;
use crate::math::fixed;

/// Amounts of a quoted swap, all in raw units.
///
/// `fee` is denominated in the output asset and already deducted from
/// `amount_out`.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
///
/// # Examples
///
/// ```
/// use crypto_swap_sim::domain::{Amount, SwapQuote};
///
/// let quote = SwapQuote::new(Amount::new(1000), Amount::new(990), Amount::new(3));
/// assert!(quote.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapQuote {
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapQuote {
    /// Creates a quote with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if either amount is zero.
    pub fn new(amount_in: Amount, amount_out: Amount, fee: Amount) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidQuantity("amount_out must be positive"));
        }
        Ok(Self {
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount, net of fee.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee, in output units.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Realized raw-unit price `amount_out / amount_in` in fixed point,
    /// rounded to nearest.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if `amount_out * 1e18` overflows.
    pub fn effective_price(&self) -> crate::error::Result<FixedPoint> {
        fixed::div(
            FixedPoint::from_raw(self.amount_out.get()),
            FixedPoint::from_raw(self.amount_in.get()),
        )
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(in={}, out={}, fee={})",
            self.amount_in, self.amount_out, self.fee
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_quote() {
        let Ok(q) = SwapQuote::new(Amount::new(1000), Amount::new(990), Amount::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount_in(), Amount::new(1000));
        assert_eq!(q.amount_out(), Amount::new(990));
        assert_eq!(q.fee(), Amount::new(3));
    }

    #[test]
    fn zero_fee_allowed() {
        assert!(SwapQuote::new(Amount::new(100), Amount::new(100), Amount::ZERO).is_ok());
    }

    #[test]
    fn invalid_zero_amount_in() {
        assert!(SwapQuote::new(Amount::ZERO, Amount::new(100), Amount::ZERO).is_err());
    }

    #[test]
    fn invalid_zero_amount_out() {
        assert!(SwapQuote::new(Amount::new(100), Amount::ZERO, Amount::ZERO).is_err());
    }

    #[test]
    fn effective_price_reference_swap() {
        let Ok(q) = SwapQuote::new(
            Amount::new(1_000_000_000_000_000_000),
            Amount::new(18_660_541_676),
            Amount::new(151_057_138),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(q.effective_price(), Ok(FixedPoint::from(18_660_541_676u64)));
    }

    #[test]
    fn effective_price_rounds() {
        let Ok(q) = SwapQuote::new(Amount::new(3), Amount::new(2), Amount::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(q.effective_price(), Ok(FixedPoint::from(666_666_666_666_666_667u64)));
    }

    #[test]
    fn display() {
        let Ok(q) = SwapQuote::new(Amount::new(100), Amount::new(90), Amount::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(q.to_string(), "SwapQuote(in=100, out=90, fee=3)");
    }
}
