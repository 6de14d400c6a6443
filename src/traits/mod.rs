//! Core trait abstractions.
//!
//! [`SwapPool`] is the `{quote, commit, snapshot}` capability every pool
//! family implements; [`FromConfig`] drives configuration-based construction.

mod from_config;
mod swap_pool;

pub use from_config::FromConfig;
pub use swap_pool::SwapPool;
