mod common;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Build the orchestrator (mock in CI when DEXSIGHT_EXAMPLES_USE_MOCK is set).
    let dex = common::builder().build()?;

    // 2. Fetch the ETH price, the top pairs and their history, then derive metrics.
    let table = dex.all_pair_data().await?;

    // 3. Print the largest pools first.
    let mut rows: Vec<_> = table.values().collect();
    rows.sort_by(|a, b| b.tracked_reserve_usd.cmp(&a.tracked_reserve_usd));
    println!(
        "{:<14} {:>16} {:>16} {:>10} {:>10}",
        "pair", "liquidity $", "24h volume $", "vol 24h %", "liq 24h %"
    );
    for row in rows.iter().take(20) {
        let name = format!("{}/{}", row.pair.token0.symbol, row.pair.token1.symbol);
        println!(
            "{:<14} {:>16} {:>16} {:>10} {:>10}",
            name,
            row.tracked_reserve_usd.round_dp(0),
            row.one_day_volume_usd.round_dp(0),
            row.volume_change_usd.round_dp(2),
            row.liquidity_change_usd.round_dp(2),
        );
    }

    Ok(())
}
