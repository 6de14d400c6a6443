//! Pool instantiation via the factory pattern.
//!
//! The [`DefaultPoolFactory`] creates pool instances from [`AmmConfig`]
//! values, validating configuration and dispatching to the appropriate
//! pool constructor based on the config variant.
//!
//! # Usage
//!
//! ```rust
//! use crypto_swap_sim::domain::Clock;
//! use crypto_swap_sim::factory::DefaultPoolFactory;
//!
//! let json = r#"{
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
//!         "last_prices_timestamp": 1709616000
//!     }
//! }"#;
//!
//! let factory = DefaultPoolFactory::new(Clock::Fixed(1_709_620_000));
//! let pool = factory.create_from_snapshot("aqua", json)
//!     .expect("pool created");
//! assert!(pool.as_crypto().is_some());
//! ```
//!
//! [`AmmConfig`]: crate::config::AmmConfig

mod default_factory;

pub use default_factory::DefaultPoolFactory;
