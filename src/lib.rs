//! # Crypto Swap Sim
//!
//! Off-chain simulator for two-asset crypto-invariant (Curve V2 / Aqua
//! style) pools. Given a pool snapshot from a tracker it quotes swaps,
//! commits them into the snapshot and exports the updated state, matching
//! the on-chain contract's integer arithmetic bit for bit.
//!
//! All numeric state is 256-bit unsigned integers; values scaled by `1e18`
//! are carried as [`FixedPoint`](domain::FixedPoint) and raw token units as
//! [`Amount`](domain::Amount).
//!
//! ## Quote and commit a swap
//!
//! ```rust
//! use crypto_swap_sim::config::AmmConfig;
//! use crypto_swap_sim::domain::{Amount, Clock};
//! use crypto_swap_sim::factory::DefaultPoolFactory;
//! use crypto_swap_sim::traits::SwapPool;
//!
//! let snapshot = r#"{
//!     "curve": { "a": "4000000", "gamma": "1450000000000000" },
//!     "assets": [
//!         { "precision_multiplier": "1",
//!           "swap_fee": { "min_fee": "800", "max_fee": "1000", "fee_gamma": "230000000000000" } },
//!         { "precision_multiplier": "1000000000",
//!           "swap_fee": { "min_fee": "800", "max_fee": "1000", "fee_gamma": "230000000000000" } }
//!     ],
//!     "state": {
//!         "balances": ["8466391136317679557", "193408158540"],
//!         "d": "18973521177677971086",
//!         "price_scale": "54451990779514461",
//!         "last_prices": "54451990779514461",
//!         "price_oracle": "54451990779514461",
//!         "lp_supply": "37758794556622160853",
//!         "xcp_profit": "1100000000000000000",
//!         "virtual_price": "1076695600534779561",
//!         "rebalance": {
//!             "allowed_extra_profit": "10000000000000",
//!             "adjustment_step": "1000000000000000",
//!             "ma_half_time": 600
//!         },
//!         "not_adjusted": false,
//!         "last_prices_timestamp": 1709616000,
//!         "future_time": 1709616182
//!     }
//! }"#;
//!
//! // 1. Decode the tracker snapshot
//! let config = AmmConfig::from_pool_type("aqua", snapshot).expect("valid snapshot");
//!
//! // 2. Build a pool with a reproducible clock
//! let factory = DefaultPoolFactory::new(Clock::Fixed(1_709_620_000));
//! let mut pool = factory.create(&config).expect("pool created");
//!
//! // 3. Quote 1 unit of asset 0 for asset 1
//! let quote = pool.quote(0, 1, Amount::new(1_000_000_000_000_000_000)).expect("quote");
//! assert_eq!(quote.amount_out(), Amount::new(18_660_541_676));
//!
//! // 4. Commit it and read the new state
//! pool.commit(0, 1, quote.amount_in(), quote.amount_out()).expect("commit");
//! assert_eq!(pool.snapshot().balances[1], Amount::new(174_747_616_864));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Tracker    │  pool type + JSON snapshot
//! └──────┬──────┘
//!        │ AmmConfig::from_pool_type
//!        ▼
//! ┌─────────────┐
//! │   Factory    │  validates config, dispatches to FromConfig
//! └──────┬──────┘
//!        │ PoolBox (enum dispatch)
//!        ▼
//! ┌─────────────┐
//! │    Pools     │  CryptoPool: quote, commit, snapshot, rebalance
//! └──────┬──────┘
//!        │ solve_d, solve_y, dynamic_fee, update_price_oracle
//!        ▼
//! ┌─────────────┐
//! │    Math      │  fixed-point kernel over U256
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`FixedPoint`](domain::FixedPoint), [`PackedPrices`](domain::PackedPrices), [`PoolState`](domain::PoolState), etc. |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Snapshot decoding: [`AmmConfig`](config::AmmConfig), [`CryptoPoolConfig`](config::CryptoPoolConfig) |
//! | [`pools`]  | [`CryptoPool`](pools::CryptoPool) and the [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) for config-driven pool construction |
//! | [`math`]   | Fixed-point kernel, invariant solvers, oracle and fee |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
