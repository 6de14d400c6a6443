//! Pool simulators and the [`PoolBox`] dispatch enum.
//!
//! | Pool | Style |
//! |------|-------|
//! | [`CryptoPool`] | Curve V2 / Aqua two-asset crypto invariant |

pub mod crypto;
mod pool_box;

#[cfg(test)]
mod proptest_properties;

pub use crypto::CryptoPool;
pub use pool_box::PoolBox;
