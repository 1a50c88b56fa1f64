use dexsight::{FetchPolicy, Transactions};
use dexsight_mock::{DynamicMockConnector, MockBehavior, MockCall};

use crate::helpers::{addr, dex_over, fixture_dex, PEPE_WETH, USDC_WETH};

#[tokio::test]
async fn listings_bypass_the_cache() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_transactions(MockBehavior::Return(Transactions::default()))
        .await;
    let dex = dex_over(mock);

    dex.all_pair_transactions().await.unwrap();
    dex.pair_transactions(&addr(USDC_WETH)).await.unwrap();

    assert_eq!(
        controller.calls().await,
        vec![
            MockCall::Transactions {
                pairs: None,
                policy: FetchPolicy::NoCache
            },
            MockCall::Transactions {
                pairs: Some(vec![addr(USDC_WETH)]),
                policy: FetchPolicy::NoCache
            },
        ]
    );
}

#[tokio::test]
async fn pair_listing_only_touches_that_pair() {
    let dex = fixture_dex();
    let all = dex.all_pair_transactions().await.unwrap();
    let one = dex.pair_transactions(&addr(PEPE_WETH)).await.unwrap();

    assert_eq!(one.len(), 4);
    assert_eq!(all.len(), 12);
    assert!(one.swaps.iter().all(|s| s.pair.token0.symbol == "PEPE"));
}
