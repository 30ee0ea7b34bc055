//! Basic usage example for the pool client
//!
//! Walks through configuration, amount handling, and action planning
//! without touching a live chain.

use pool_client::amount::{share_percent, to_base_units, to_display};
use pool_client::sequencer;
use pool_client::{ActionRequest, PoolConfig};

fn main() -> anyhow::Result<()> {
    println!("=== Pool Client Basic Usage ===\n");

    // 1. Configuration
    let config = PoolConfig::localnet("0x00112233445566778899aabbccddeeff00112233");
    println!("Configuration:");
    println!("  RPC URL: {}", config.rpc_url);
    println!("  Pool:    {}", config.pool_address);
    println!(
        "  Pair:    {} / {}",
        config.tokens.symbol_a, config.tokens.symbol_b
    );

    // 2. Amount conversions
    let base = to_base_units("1.5")?;
    println!("\nAmounts:");
    println!("  1.5 {} = {} base units", config.tokens.symbol_a, base);
    println!("  back to display: {}", to_display(base));
    println!(
        "  share for 250 of 1000: {}%",
        share_percent(to_base_units("250")?, to_base_units("1000")?)
    );

    // 3. Action planning
    let plan = sequencer::plan(
        &ActionRequest::AddLiquidity {
            amount_a: "10".to_string(),
            amount_b: "20".to_string(),
        },
        &config,
    )?;
    println!("\nAdd-liquidity plan:");
    for (token, amount) in &plan.approvals {
        println!("  approve {} for {token}", to_display(*amount));
    }
    println!("  then: {:?}", plan.call);

    Ok(())
}
