//! Enum dispatch wrapper for all pool families.
//!
//! [`PoolBox`] wraps every concrete simulator behind a single enum so the
//! router can hold heterogeneous pools without `dyn` trait objects.

use super::crypto::CryptoPool;

use crate::domain::{Amount, PoolState, SwapQuote};
use crate::error::{CommitError, QuoteError};
use crate::traits::SwapPool;

/// Static dispatch enum over the supported pool simulators.
///
/// The enum implements [`SwapPool`] by delegating every call to the inner
/// pool via `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolBox {
    /// Two-asset crypto-invariant pool.
    Crypto(Box<CryptoPool>),
}

/// Delegates a method call to the inner pool of every variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            PoolBox::Crypto(p) => p.$method($($arg),*),
        }
    };
}

impl PoolBox {
    /// Returns the crypto pool, if this is one.
    #[must_use]
    pub fn as_crypto(&self) -> Option<&CryptoPool> {
        match self {
            Self::Crypto(p) => Some(p),
        }
    }
}

impl SwapPool for PoolBox {
    fn quote(
        &self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
    ) -> Result<SwapQuote, QuoteError> {
        delegate!(self, quote(asset_in, asset_out, amount_in))
    }

    fn commit(
        &mut self,
        asset_in: usize,
        asset_out: usize,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<(), CommitError> {
        delegate!(self, commit(asset_in, asset_out, amount_in, amount_out))
    }

    fn snapshot(&self) -> PoolState {
        delegate!(self, snapshot())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::crypto::tests::REFERENCE_JSON;
    use crate::config::CryptoPoolConfig;
    use crate::domain::Clock;
    use crate::traits::FromConfig;

    fn boxed() -> PoolBox {
        let Ok(cfg) = CryptoPoolConfig::from_json(REFERENCE_JSON) else {
            panic!("valid config");
        };
        let Ok(pool) = CryptoPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        PoolBox::Crypto(Box::new(pool.with_clock(Clock::Fixed(1_709_620_000))))
    }

    #[test]
    fn delegates_quote_and_commit() {
        let mut pool = boxed();
        let Ok(q) = pool.quote(0, 1, Amount::new(1_000_000_000_000_000_000)) else {
            panic!("expected quote");
        };
        assert_eq!(q.amount_out(), Amount::new(18_660_541_676));
        let Ok(()) = pool.commit(0, 1, q.amount_in(), q.amount_out()) else {
            panic!("expected commit");
        };
        assert_eq!(pool.snapshot().balances[1], Amount::new(174_747_616_864));
    }

    #[test]
    fn as_crypto_exposes_inner() {
        let pool = boxed();
        let Some(inner) = pool.as_crypto() else {
            panic!("expected crypto pool");
        };
        assert_eq!(inner.snapshot(), pool.snapshot());
    }
}
