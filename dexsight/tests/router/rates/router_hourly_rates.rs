use dexsight::{BlockRef, Decimal, RateSample};
use dexsight_mock::{DynamicMockConnector, MOCK_NOW, MockBehavior, MockCall, MockConnector};

use crate::helpers::{addr, dex_over, fixture_dex, pinned, USDC_WETH};

const HOUR: i64 = 3_600;

fn sample(timestamp: i64, p0: i64, p1: i64) -> RateSample {
    RateSample {
        timestamp,
        token0_price: Decimal::from(p0),
        token1_price: Decimal::from(p1),
    }
}

#[tokio::test]
async fn fixture_rates_form_chained_candles() {
    let dex = fixture_dex();
    let start = MOCK_NOW - 5 * HOUR;
    let rates = dex
        .hourly_rate_data(&addr(USDC_WETH), start, None)
        .await
        .unwrap();

    assert_eq!(rates.token0.len(), 4);
    assert_eq!(rates.token1.len(), 4);
    assert_eq!(rates.token0[0].timestamp, start);
    assert_eq!(rates.token0[3].timestamp, start + 3 * HOUR);
    assert!(rates.token0.windows(2).all(|w| w[0].close == w[1].open));
}

#[tokio::test]
async fn blocks_above_latest_are_dropped() {
    let dex = fixture_dex();
    let start = MOCK_NOW - 5 * HOUR;
    let latest = MockConnector::block_at(start + 2 * HOUR).unwrap();
    let rates = dex
        .hourly_rate_data(&addr(USDC_WETH), start, Some(latest))
        .await
        .unwrap();

    assert_eq!(rates.token0.len(), 2);
    assert_eq!(rates.token0[1].timestamp, start + HOUR);
}

#[tokio::test]
async fn recent_start_yields_nothing_without_calls() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let dex = dex_over(mock);

    let rates = dex
        .hourly_rate_data(&addr(USDC_WETH), MOCK_NOW - HOUR / 2, None)
        .await
        .unwrap();
    assert!(rates.is_empty());
    assert!(controller.calls().await.is_empty());
}

#[tokio::test]
async fn unresolved_blocks_yield_nothing() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller.set_blocks(MockBehavior::Return(vec![])).await;
    let dex = dex_over(mock);

    let rates = dex
        .hourly_rate_data(&addr(USDC_WETH), MOCK_NOW - 3 * HOUR, None)
        .await
        .unwrap();
    assert!(rates.is_empty());
    assert!(
        !controller
            .calls()
            .await
            .iter()
            .any(|c| matches!(c, MockCall::RatesAtBlocks { .. }))
    );
}

#[tokio::test]
async fn blocks_resolve_in_batches_and_samples_are_ordered() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let pair = addr(USDC_WETH);
    let start = MOCK_NOW - 5 * HOUR;
    let ts: Vec<i64> = (0..5).map(|i| start + i * HOUR).collect();

    let blocks: Vec<BlockRef> = ts
        .iter()
        .zip(100_u64..)
        .map(|(&t, n)| BlockRef::new(t, n))
        .collect();
    controller.set_blocks(MockBehavior::Return(blocks)).await;
    controller
        .set_rates(
            pair.clone(),
            MockBehavior::Return(vec![
                sample(ts[2], 3, 30),
                sample(ts[0], 1, 10),
                sample(ts[4], 5, 50),
                sample(ts[1], 2, 20),
                sample(ts[3], 4, 40),
            ]),
        )
        .await;

    let dex = pinned()
        .with_connector(mock)
        .block_batch_size(2)
        .build()
        .unwrap();
    let rates = dex.hourly_rate_data(&pair, start, None).await.unwrap();

    let batches: Vec<Vec<i64>> = controller
        .calls()
        .await
        .into_iter()
        .filter_map(|c| match c {
            MockCall::Blocks(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(
        batches,
        vec![ts[0..2].to_vec(), ts[2..4].to_vec(), ts[4..].to_vec()]
    );

    let opens: Vec<Decimal> = rates.token0.iter().map(|c| c.open).collect();
    let closes: Vec<Decimal> = rates.token1.iter().map(|c| c.close).collect();
    assert_eq!(opens, [1_i64, 2, 3, 4].map(Decimal::from).to_vec());
    assert_eq!(closes, [20_i64, 30, 40, 50].map(Decimal::from).to_vec());
    assert_eq!(rates.token1[0].timestamp, start);
}
