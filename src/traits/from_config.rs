//! Generic construction trait for pool instantiation from configuration.
//!
//! Each pool family implements `FromConfig<C>` for its own config struct so
//! the factory can dispatch construction without trait objects:
//!
//! ```text
//! AmmConfig::Crypto(cfg) => CryptoPool::from_config(&cfg)
//! ```
//!
//! Implementations validate every invariant up front; a constructed pool
//! is always in a usable state.

use crate::error::AmmError;

/// Builds a pool from a configuration.
///
/// # Implementors
///
/// - `impl FromConfig<CryptoPoolConfig> for CryptoPool`
pub trait FromConfig<C> {
    /// Creates a pool from `config`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] or [`AmmError::InvalidConfiguration`]
    /// if the configuration is unusable.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
