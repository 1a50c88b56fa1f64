mod common;

use dexsight::Address;

const USDC_WETH: &str = "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let dex = common::builder().build()?;

    // Listings always go upstream, even behind a cache.
    let all = dex.all_pair_transactions().await?;
    println!(
        "all pairs: {} mints, {} burns, {} swaps",
        all.mints.len(),
        all.burns.len(),
        all.swaps.len()
    );

    let one = dex.pair_transactions(&Address::new(USDC_WETH)?).await?;
    for swap in one.swaps.iter().take(10) {
        println!(
            "{}  {}/{}  ${}",
            swap.transaction.timestamp,
            swap.pair.token0.symbol,
            swap.pair.token1.symbol,
            swap.amount_usd.round_dp(2)
        );
    }

    Ok(())
}
