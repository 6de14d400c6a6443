//! Top-level AMM configuration enum.
//!
//! [`AmmConfig`] is the declarative blueprint handed to the factory. Each
//! variant wraps a family-specific configuration struct.
//!
//! ```text
//! match config {
//!     AmmConfig::Crypto(cfg) => CryptoPool::from_config(&cfg),
//! }
//! ```

use super::CryptoPoolConfig;
use crate::error::{AmmError, Result};

/// Pool-type strings accepted by [`AmmConfig::from_pool_type`].
pub const CRYPTO_POOL_TYPES: [&str; 2] = ["crypto", "aqua"];

/// Top-level configuration enum for all supported pool families.
///
/// # Variants
///
/// - [`Crypto`](AmmConfig::Crypto): two-asset crypto-invariant pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmmConfig {
    /// Crypto-invariant (Curve V2 / Aqua style) configuration.
    Crypto(CryptoPoolConfig),
}

impl AmmConfig {
    /// Resolves a tracker pool-type string and decodes its JSON snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for an unknown pool type.
    /// - [`AmmError::InvalidSnapshot`] if the snapshot does not decode.
    pub fn from_pool_type(pool_type: &str, snapshot_json: &str) -> Result<Self> {
        if CRYPTO_POOL_TYPES.contains(&pool_type) {
            return CryptoPoolConfig::from_json(snapshot_json).map(Self::Crypto);
        }
        Err(AmmError::InvalidConfiguration("unknown pool type"))
    }

    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the same [`AmmError`] as the inner `validate()`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Crypto(cfg) => cfg.validate(),
        }
    }

    /// Returns `true` if this is a [`Crypto`](Self::Crypto) variant.
    #[must_use]
    pub const fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto(_))
    }
}

impl core::fmt::Display for AmmConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Crypto(_) => write!(f, "Crypto"),
        }
    }
}
