use std::sync::Arc;

use dexsight::{Decimal, DexError, SubgraphConnector};
use dexsight_mock::{DynamicMockConnector, MockBehavior, MockCall};

use crate::helpers::{addr, dex_over, pinned, USDC_WETH};

/// Advertises nothing.
struct Bare;

impl SubgraphConnector for Bare {
    fn name(&self) -> &'static str {
        "bare"
    }
    fn vendor(&self) -> &'static str {
        "test"
    }
}

#[tokio::test]
async fn missing_capability_is_unsupported() {
    let dex = dex_over(Arc::new(Bare));

    let err = dex.top_pair_ids().await.unwrap_err();
    assert_eq!(err, DexError::unsupported("top-pairs"));

    let err = dex.pair_chart_data(&addr(USDC_WETH)).await.unwrap_err();
    assert_eq!(err, DexError::unsupported("pair-chart"));
}

#[tokio::test]
async fn first_capable_connector_wins() {
    let (first, c1) = DynamicMockConnector::new_with_controller("first");
    let (second, c2) = DynamicMockConnector::new_with_controller("second");
    c1.set_eth_price(MockBehavior::Return(Decimal::from(1_000))).await;
    c2.set_eth_price(MockBehavior::Return(Decimal::from(2_000))).await;

    let dex = pinned()
        .with_connector(Arc::new(Bare))
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();

    assert_eq!(dex.eth_price().await.unwrap(), Decimal::from(1_000));
    assert_eq!(c1.calls().await, vec![MockCall::EthPrice]);
    assert!(c2.calls().await.is_empty());
}

#[tokio::test]
async fn connector_errors_are_not_retried_elsewhere() {
    let (first, c1) = DynamicMockConnector::new_with_controller("first");
    let (second, c2) = DynamicMockConnector::new_with_controller("second");
    c1.set_eth_price(MockBehavior::Fail(DexError::connector("first", "boom")))
        .await;
    c2.set_eth_price(MockBehavior::Return(Decimal::ONE)).await;

    let dex = pinned()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();

    let err = dex.eth_price().await.unwrap_err();
    assert_eq!(err, DexError::connector("first", "boom"));
    assert!(c2.calls().await.is_empty());
}
