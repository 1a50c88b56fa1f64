use dexsight::{CacheConfig, ConnectorBuilder, Decimal, DexError, Transactions};
use dexsight_mock::{DynamicMockConnector, MockBehavior, MockCall};

use crate::helpers::{addr, dex_over, USDC_WETH};

fn count(calls: &[MockCall], pred: impl Fn(&MockCall) -> bool) -> usize {
    calls.iter().filter(|c| pred(c)).count()
}

#[tokio::test]
async fn reads_go_through_the_cache() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_eth_price(MockBehavior::Return(Decimal::from(1_900)))
        .await;
    controller
        .set_chart(addr(USDC_WETH), MockBehavior::Return(vec![]))
        .await;
    let cached = ConnectorBuilder::new(mock)
        .with_cache(&CacheConfig::default())
        .build()
        .unwrap();
    let dex = dex_over(cached);

    assert_eq!(dex.eth_price().await.unwrap(), Decimal::from(1_900));
    assert_eq!(dex.eth_price().await.unwrap(), Decimal::from(1_900));
    dex.pair_chart_data(&addr(USDC_WETH)).await.unwrap();
    dex.pair_chart_data(&addr(USDC_WETH)).await.unwrap();

    let calls = controller.calls().await;
    assert_eq!(count(&calls, |c| matches!(c, MockCall::EthPrice)), 1);
    assert_eq!(
        count(&calls, |c| matches!(c, MockCall::PairDayDatas { .. })),
        1
    );
}

#[tokio::test]
async fn transactions_are_always_fetched() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_transactions(MockBehavior::Return(Transactions::default()))
        .await;
    let cached = ConnectorBuilder::new(mock)
        .with_cache(&CacheConfig::default())
        .build()
        .unwrap();
    let dex = dex_over(cached);

    dex.all_pair_transactions().await.unwrap();
    dex.all_pair_transactions().await.unwrap();

    let calls = controller.calls().await;
    assert_eq!(
        count(&calls, |c| matches!(c, MockCall::Transactions { .. })),
        2
    );
}

#[tokio::test]
async fn failures_are_not_cached() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_eth_price(MockBehavior::Fail(DexError::connector("dyn", "down")))
        .await;
    let cached = ConnectorBuilder::new(mock)
        .with_cache(&CacheConfig::default())
        .build()
        .unwrap();
    let dex = dex_over(cached);

    assert!(dex.eth_price().await.is_err());
    controller
        .set_eth_price(MockBehavior::Return(Decimal::ONE))
        .await;
    assert_eq!(dex.eth_price().await.unwrap(), Decimal::ONE);
}
