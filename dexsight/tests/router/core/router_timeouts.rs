use std::sync::Arc;
use std::time::Duration;

use dexsight::DexError;
use dexsight_mock::{DynamicMockConnector, MockBehavior, MockConnector, SLOW_PAIR};

use crate::helpers::{addr, dex_over, pinned, snapshot, USDC_WETH};

#[tokio::test]
async fn slow_provider_call_times_out() {
    let dex = pinned()
        .with_connector(Arc::new(MockConnector::new()))
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let err = dex
        .pair_chart_data(&addr(SLOW_PAIR))
        .await
        .unwrap_err();
    assert_eq!(err, DexError::provider_timeout("dexsight-mock", "pair-chart"));
}

#[tokio::test(start_paused = true)]
async fn hung_provider_call_times_out() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("hang");
    controller.set_eth_price(MockBehavior::Hang).await;

    let dex = dex_over(mock);
    let err = dex.eth_price().await.unwrap_err();
    assert_eq!(err, DexError::provider_timeout("hang", "eth-price"));
}

#[tokio::test(start_paused = true)]
async fn historical_fan_out_honors_request_deadline() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let pair_id = addr(USDC_WETH);
    let blocks = crate::helpers::lookback_blocks();
    controller
        .set_blocks(MockBehavior::Return(blocks.to_vec()))
        .await;
    controller
        .set_pairs(MockBehavior::Return(vec![crate::helpers::pair(USDC_WETH, 10, 10)]))
        .await;
    controller
        .set_history_at(blocks[0].number, MockBehavior::Hang)
        .await;
    for b in &blocks[1..] {
        controller
            .set_history_at(b.number, MockBehavior::Return(vec![snapshot(USDC_WETH, 5, 5)]))
            .await;
    }

    let dex = pinned()
        .with_connector(mock)
        .request_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = dex
        .bulk_pair_data(&[pair_id], dexsight::Decimal::ONE)
        .await
        .unwrap_err();
    assert_eq!(err, DexError::request_timeout("historical-pairs"));
}
