//! Pool configuration enums and structs.
//!
//! [`AmmConfig`] is the top-level declarative blueprint; [`CryptoPoolConfig`]
//! carries the parameters and snapshot of a crypto-invariant pool.

mod amm_config;
pub(crate) mod crypto;

pub use amm_config::{AmmConfig, CRYPTO_POOL_TYPES};
pub use crypto::CryptoPoolConfig;
