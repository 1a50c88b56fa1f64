use dexsight::Decimal;
use dexsight_mock::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

use crate::helpers::{addr, dex_over, lookback_blocks, pair, snapshot, USDC_WETH, WBTC_WETH};

const A: &str = USDC_WETH;
const B: &str = WBTC_WETH;

/// A is in every historical batch; B is missing from the one-day batch only.
async fn seed(controller: &DynamicMockController) {
    let [b1, b2, b7] = lookback_blocks();
    controller
        .set_blocks(MockBehavior::Return(lookback_blocks().to_vec()))
        .await;
    controller
        .set_pairs(MockBehavior::Return(vec![pair(A, 1_000, 100), pair(B, 500, 80)]))
        .await;
    controller
        .set_history_at(b1.number, MockBehavior::Return(vec![snapshot(A, 900, 50)]))
        .await;
    controller
        .set_history_at(
            b2.number,
            MockBehavior::Return(vec![snapshot(A, 850, 50), snapshot(B, 400, 80)]),
        )
        .await;
    controller
        .set_history_at(
            b7.number,
            MockBehavior::Return(vec![snapshot(A, 100, 50), snapshot(B, 100, 80)]),
        )
        .await;
}

fn point_lookups(calls: &[MockCall]) -> Vec<&MockCall> {
    calls
        .iter()
        .filter(|c| matches!(c, MockCall::PairAtBlock { .. }))
        .collect()
}

#[tokio::test]
async fn missing_pair_triggers_one_point_lookup() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    seed(&controller).await;
    let b1 = lookback_blocks()[0].number;
    controller
        .set_pair_at_block(addr(B), b1, MockBehavior::Return(Some(pair(B, 450, 40))))
        .await;

    let dex = dex_over(mock);
    let rows = dex
        .bulk_pair_data(&[addr(A), addr(B)], Decimal::from(2_000))
        .await
        .unwrap();

    let calls = controller.calls().await;
    assert_eq!(
        point_lookups(&calls),
        vec![&MockCall::PairAtBlock {
            id: addr(B),
            block: b1
        }]
    );

    let a = rows.iter().find(|r| r.pair.id == addr(A)).unwrap();
    let b = rows.iter().find(|r| r.pair.id == addr(B)).unwrap();
    assert_eq!(a.one_day_volume_usd, Decimal::from(100));
    assert_eq!(a.liquidity_change_usd, Decimal::from(100));
    assert_eq!(b.one_day_volume_usd, Decimal::from(50));
    assert_eq!(b.liquidity_change_usd, Decimal::from(100));
    assert_eq!(b.one_week_volume_usd, Decimal::from(400));
    assert_eq!(b.tracked_reserve_usd, Decimal::from(20_000));
}

#[tokio::test]
async fn empty_point_lookup_counts_as_no_history() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    seed(&controller).await;
    let b1 = lookback_blocks()[0].number;
    controller
        .set_pair_at_block(addr(B), b1, MockBehavior::Return(None))
        .await;

    let dex = dex_over(mock);
    let rows = dex
        .bulk_pair_data(&[addr(A), addr(B)], Decimal::ONE)
        .await
        .unwrap();

    let b = rows.iter().find(|r| r.pair.id == addr(B)).unwrap();
    assert_eq!(b.one_day_volume_usd, Decimal::from(500));
    assert_eq!(b.liquidity_change_usd, Decimal::ZERO);
}

#[tokio::test]
async fn batches_run_once_per_lookback_block() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    seed(&controller).await;
    let b1 = lookback_blocks()[0].number;
    controller
        .set_pair_at_block(addr(B), b1, MockBehavior::Return(None))
        .await;

    let dex = dex_over(mock);
    dex.bulk_pair_data(&[addr(A), addr(B)], Decimal::ONE)
        .await
        .unwrap();

    let mut blocks: Vec<u64> = controller
        .calls()
        .await
        .into_iter()
        .filter_map(|c| match c {
            MockCall::PairsAtBlock { block, ids } => {
                assert_eq!(ids, vec![addr(A), addr(B)]);
                Some(block)
            }
            _ => None,
        })
        .collect();
    blocks.sort_unstable();
    assert_eq!(blocks, vec![1_001, 1_002, 1_007]);
}

#[tokio::test]
async fn missing_lookback_block_is_not_found() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    seed(&controller).await;
    controller
        .set_blocks(MockBehavior::Return(lookback_blocks()[..2].to_vec()))
        .await;

    let dex = dex_over(mock);
    let err = dex
        .bulk_pair_data(&[addr(A)], Decimal::ONE)
        .await
        .unwrap_err();
    assert!(matches!(err, dexsight::DexError::NotFound { .. }));
}
