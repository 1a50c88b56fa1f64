mod common;

use dexsight::Address;

const USDC_WETH: &str = "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let dex = common::builder().build()?;
    let pair = Address::new(&std::env::args().nth(1).unwrap_or_else(|| USDC_WETH.into()))?;

    // Every page of daily snapshots, with quiet days padded in.
    let chart = dex.pair_chart_data(&pair).await?;
    let padded = chart.iter().filter(|d| d.is_synthesized()).count();
    println!("{} days ({padded} without trades)", chart.len());

    for day in chart.iter().rev().take(14) {
        let date = day
            .datetime()
            .map_or_else(|| day.date.to_string(), |d| d.date_naive().to_string());
        println!(
            "{date}  volume ${:>14}  reserve ${:>16}",
            day.daily_volume_usd.round_dp(0),
            day.reserve_usd.round_dp(0)
        );
    }

    Ok(())
}
