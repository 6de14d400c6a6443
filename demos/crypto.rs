//! Crypto-invariant pool example (Curve V2 / Aqua style).
//!
//! Loads a tracker snapshot, quotes swaps in both directions, commits one
//! and prints how the internal state moves.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=crypto_swap_sim=debug cargo run --example crypto
//! ```

use crypto_swap_sim::config::{AmmConfig, CryptoPoolConfig};
use crypto_swap_sim::domain::{Amount, Clock};
use crypto_swap_sim::factory::DefaultPoolFactory;
use crypto_swap_sim::traits::SwapPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SNAPSHOT: &str = include_str!("../tests/fixtures/aqua_pool.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crypto_swap_sim=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Crypto-invariant AMM (Curve V2 style) ===\n");

    // ── 1. Decode the tracker snapshot ──────────────────────────────────
    let config = AmmConfig::from_pool_type("aqua", SNAPSHOT)?;
    let AmmConfig::Crypto(ref crypto) = config;
    println!("Pool config: {config}");
    println!("  A:           {}", crypto.curve().a);
    println!("  gamma:       {}", crypto.curve().gamma);
    println!("  balances:    {} / {}", crypto.state().balances[0], crypto.state().balances[1]);
    println!("  price scale: {}", crypto.state().price_scale.get(0));

    // ── 2. Build the pool at a fixed timestamp ──────────────────────────
    let now = crypto.state().last_prices_timestamp + 4_000;
    let mut pool = DefaultPoolFactory::new(Clock::Fixed(now)).create(&config)?;

    // ── 3. Quote both directions ────────────────────────────────────────
    let sell = pool.quote(0, 1, Amount::new(1_000_000_000_000_000_000))?;
    println!("\nSell 1e18 of asset 0: {sell}");
    println!("  effective price: {}", sell.effective_price()?);

    let buy = pool.quote(1, 0, Amount::new(10_000_000_000))?;
    println!("Sell 1e10 of asset 1: {buy}");

    // ── 4. Commit the first quote ───────────────────────────────────────
    let before = pool.snapshot();
    pool.commit(0, 1, sell.amount_in(), sell.amount_out())?;
    let after = pool.snapshot();

    println!("\nAfter commit:");
    println!("  D:             {} -> {}", before.d, after.d);
    println!("  virtual price: {} -> {}", before.virtual_price, after.virtual_price);
    println!("  xcp profit:    {} -> {}", before.xcp_profit, after.xcp_profit);
    println!("  last price:    {}", after.last_prices.get(0));
    println!("  oracle:        {}", after.price_oracle.get(0));
    println!("  price scale:   {}", after.price_scale.get(0));

    // ── 5. Export the state for the next round ──────────────────────────
    let next = CryptoPoolConfig::new(*crypto.curve(), *crypto.assets(), after)?;
    println!("\nExported snapshot:\n{}", next.to_json()?);

    Ok(())
}
