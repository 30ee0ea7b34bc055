//! Full session walkthrough against the in-memory test gateway
//!
//! Mirrors the dashboard flow (connect, swap, add liquidity, remove
//! liquidity), printing the derived pool state after each step. Run with
//! `RUST_LOG=pool_client=debug` to see the internal trace.

use pool_client::testing::{test_address, test_config, MockGateway, MockWallet};
use pool_client::{ActionKind, ActionRequest, PoolApp, PoolSnapshot};
use tracing_subscriber::EnvFilter;

fn print_snapshot(snapshot: &PoolSnapshot) {
    println!("  reserves:    {} / {}", snapshot.reserve_a, snapshot.reserve_b);
    println!("  your shares: {} of {}", snapshot.user_shares, snapshot.total_shares);
    println!("  pool share:  {}%", snapshot.share_percent);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut app = PoolApp::new(
        MockWallet::with_account(test_address(0x11)),
        MockGateway::with_pool_state(100, 200, 1000, 250),
        test_config(),
    )?;

    println!("=== Pool Dashboard Walkthrough ===\n");

    let session = app.connect().await;
    println!(
        "Connected as {}",
        session.account.expect("mock wallet always connects")
    );
    print_snapshot(app.snapshot());

    println!("\nSwapping 5 TK1 -> TK2...");
    app.submit(ActionRequest::Swap {
        amount: "5".to_string(),
        a_to_b: true,
    })
    .await;
    match &app.action(ActionKind::Swap).error {
        Some(error) => println!("  swap failed: {error}"),
        None => print_snapshot(app.snapshot()),
    }

    println!("\nAdding 10 TK1 / 20 TK2 of liquidity...");
    app.submit(ActionRequest::AddLiquidity {
        amount_a: "10".to_string(),
        amount_b: "20".to_string(),
    })
    .await;
    match &app.action(ActionKind::AddLiquidity).error {
        Some(error) => println!("  add liquidity failed: {error}"),
        None => print_snapshot(app.snapshot()),
    }

    println!("\nRemoving 3 shares...");
    app.submit(ActionRequest::RemoveLiquidity {
        amount: "3".to_string(),
    })
    .await;
    match &app.action(ActionKind::RemoveLiquidity).error {
        Some(error) => println!("  remove liquidity failed: {error}"),
        None => print_snapshot(app.snapshot()),
    }

    Ok(())
}
