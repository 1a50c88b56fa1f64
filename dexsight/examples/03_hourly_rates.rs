mod common;

use dexsight::Address;

const USDC_WETH: &str = "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let dex = common::builder().build()?;
    let pair = Address::new(USDC_WETH)?;

    // Last 24 hours, one candle per hour.
    let now = if common::use_mock() {
        dexsight_mock::MOCK_NOW
    } else {
        chrono::Utc::now().timestamp()
    };
    let rates = dex.hourly_rate_data(&pair, now - 25 * 3_600, None).await?;

    if rates.is_empty() {
        println!("no samples");
        return Ok(());
    }
    for (c0, c1) in rates.token0.iter().zip(&rates.token1) {
        println!(
            "{}  token0 {} -> {}  token1 {} -> {}",
            c0.timestamp,
            c0.open.round_dp(6),
            c0.close.round_dp(6),
            c1.open.round_dp(6),
            c1.close.round_dp(6)
        );
    }

    Ok(())
}
