//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use crypto_swap_sim::prelude::*;
//! ```

pub use crate::domain::{
    Amount, AssetConfig, Clock, CurveParams, DynamicFee, FixedPoint, PackedPrices, PoolState,
    SwapQuote,
};

pub use crate::traits::{FromConfig, SwapPool};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{AmmConfig, CryptoPoolConfig};

pub use crate::error::{AmmError, Result};

pub use crate::factory::DefaultPoolFactory;

pub use crate::pools::{CryptoPool, PoolBox};
