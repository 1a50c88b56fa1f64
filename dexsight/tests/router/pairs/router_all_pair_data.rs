use dexsight::{Decimal, DexError};
use dexsight_mock::{FAIL_PAIR, MockConnector, WETH};

use crate::helpers::{addr, fixture_dex, pinned, PEPE_WETH, USDC_WETH, WBTC_WETH};

#[tokio::test]
async fn table_covers_top_pairs() {
    let dex = fixture_dex();
    let table = dex.all_pair_data().await.unwrap();

    let ids: Vec<&str> = table.keys().map(|a| a.as_str()).collect();
    let mut expected = vec![USDC_WETH, WBTC_WETH, PEPE_WETH];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn wrapped_ether_is_relabelled() {
    let dex = fixture_dex();
    let table = dex.all_pair_data().await.unwrap();

    for row in table.values() {
        assert_eq!(row.pair.token1.id.as_str(), WETH);
        assert_eq!(row.pair.token1.symbol, "ETH");
        assert_eq!(row.pair.token1.name, "Ether (Wrapped)");
        assert_ne!(row.pair.token0.symbol, "ETH");
    }
}

#[tokio::test]
async fn relabelling_can_be_disabled() {
    let dex = pinned()
        .with_connector(std::sync::Arc::new(MockConnector::new()))
        .token_label(None)
        .build()
        .unwrap();
    let table = dex.all_pair_data().await.unwrap();
    let usdc = &table[&addr(USDC_WETH)];
    assert_eq!(usdc.pair.token1.symbol, "WETH");
    assert_eq!(usdc.pair.token1.name, "Wrapped Ether");
}

#[tokio::test]
async fn derived_metrics_follow_history() {
    let dex = fixture_dex();
    let table = dex.all_pair_data().await.unwrap();
    let usdc = &table[&addr(USDC_WETH)];

    // one-day lookback lands 7201 blocks back at 4000 USD of volume per block
    assert_eq!(usdc.one_day_volume_usd, Decimal::from(28_804_000));
    // the previous day spans one block fewer
    assert!(usdc.volume_change_usd > Decimal::ZERO);
    assert_eq!(usdc.tracked_reserve_usd, Decimal::from(45_000 * 2_045));
    assert!(usdc.one_week_volume_usd > usdc.one_day_volume_usd);
    assert!(usdc.liquidity_change_usd > Decimal::ZERO);
}

#[tokio::test]
async fn young_pair_reports_lifetime_volume() {
    let dex = fixture_dex();
    let table = dex.all_pair_data().await.unwrap();
    let pepe = &table[&addr(PEPE_WETH)];

    assert_eq!(pepe.one_day_volume_usd, pepe.pair.volume_usd);
    assert_eq!(pepe.one_week_volume_usd, pepe.pair.volume_usd);
    assert_eq!(pepe.liquidity_change_usd, Decimal::ZERO);
}

#[tokio::test]
async fn empty_ids_short_circuit() {
    let dex = fixture_dex();
    let rows = dex.bulk_pair_data(&[], Decimal::ONE).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn any_failure_fails_the_batch() {
    let dex = fixture_dex();
    let ids = [addr(USDC_WETH), addr(FAIL_PAIR)];
    let err = dex.bulk_pair_data(&ids, Decimal::ONE).await.unwrap_err();
    assert!(matches!(err, DexError::Connector { .. }));
}
