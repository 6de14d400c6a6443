//! Default pool factory implementation.

use tracing::debug;

use crate::config::AmmConfig;
use crate::domain::Clock;
use crate::error::AmmError;
use crate::pools::crypto::CryptoPool;
use crate::pools::PoolBox;
use crate::traits::FromConfig;

/// Factory for creating pool instances from configuration.
///
/// `DefaultPoolFactory` is the single entry point for constructing a
/// simulator. It matches on the [`AmmConfig`] variant, validates the
/// configuration, delegates to the pool's [`FromConfig`] implementation,
/// installs the factory's [`Clock`] and wraps the result in a [`PoolBox`].
///
/// Build one at startup and pass it by reference to whatever needs to
/// instantiate pools; it holds no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DefaultPoolFactory {
    clock: Clock,
}

impl DefaultPoolFactory {
    /// Creates a factory whose pools read time from `clock`.
    pub const fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Returns the clock installed into every created pool.
    #[must_use]
    pub const fn clock(&self) -> Clock {
        self.clock
    }

    /// Creates a new pool instance from the given configuration.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`AmmConfig::validate`].
    /// 2. Match on the config variant.
    /// 3. Delegate to the pool's [`FromConfig`] implementation.
    /// 4. Wrap the constructed pool in the corresponding [`PoolBox`]
    ///    variant.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] or [`AmmError::InvalidSnapshot`]
    ///   if the configuration is invalid.
    /// - Any error propagated from the pool's `from_config` method.
    pub fn create(&self, config: &AmmConfig) -> Result<PoolBox, AmmError> {
        config.validate()?;

        match config {
            AmmConfig::Crypto(cfg) => {
                let pool = CryptoPool::from_config(cfg)?.with_clock(self.clock);
                debug!(kind = %config, clock = ?self.clock, "pool created");
                Ok(PoolBox::Crypto(Box::new(pool)))
            }
        }
    }

    /// Decodes a tracker snapshot for `pool_type` and builds the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for an unknown pool type.
    /// - [`AmmError::InvalidSnapshot`] if the JSON does not decode.
    /// - Anything [`create`](Self::create) returns.
    pub fn create_from_snapshot(
        &self,
        pool_type: &str,
        snapshot_json: &str,
    ) -> Result<PoolBox, AmmError> {
        let config = AmmConfig::from_pool_type(pool_type, snapshot_json)?;
        self.create(&config)
    }
}
