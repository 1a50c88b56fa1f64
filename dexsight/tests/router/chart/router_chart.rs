use dexsight::{DAY_SECONDS, Decimal, PairDayData};
use dexsight_mock::{DynamicMockConnector, MOCK_NOW, MockBehavior, MockCall};

use crate::helpers::{addr, dex_over, fixture_dex, pinned, USDC_WETH};

fn day(index: i64) -> PairDayData {
    PairDayData {
        id: Some(format!("{USDC_WETH}-{index}")),
        date: index * DAY_SECONDS,
        daily_volume_usd: Decimal::from(index),
        reserve_usd: Decimal::from(1_000 + index),
        daily_volume_token0: None,
        daily_volume_token1: None,
    }
}

/// `count` consecutive days ending on the day of `MOCK_NOW`, newest first.
fn newest_first(count: i64) -> Vec<PairDayData> {
    let last = MOCK_NOW.div_euclid(DAY_SECONDS);
    (0..count).map(|i| day(last - i)).collect()
}

fn pages(calls: &[MockCall]) -> Vec<(usize, usize)> {
    calls
        .iter()
        .filter_map(|c| match c {
            MockCall::PairDayDatas { skip, first, .. } => Some((*skip, *first)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn pages_until_short_page_and_sorts() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let pair = addr(USDC_WETH);
    controller
        .set_chart(pair.clone(), MockBehavior::Return(newest_first(1_160)))
        .await;

    let dex = dex_over(mock);
    let chart = dex.pair_chart_data(&pair).await.unwrap();

    assert_eq!(pages(&controller.calls().await), vec![(0, 1_000), (1_000, 1_000)]);
    assert_eq!(chart.len(), 1_160);
    assert!(chart.windows(2).all(|w| w[1].date - w[0].date == DAY_SECONDS));
    assert!(chart.iter().all(|d| !d.is_synthesized()));
}

#[tokio::test]
async fn full_last_page_needs_one_more_request() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let pair = addr(USDC_WETH);
    controller
        .set_chart(pair.clone(), MockBehavior::Return(newest_first(20)))
        .await;

    let dex = pinned().with_connector(mock).chart_page_size(10).build().unwrap();
    let chart = dex.pair_chart_data(&pair).await.unwrap();

    assert_eq!(
        pages(&controller.calls().await),
        vec![(0, 10), (10, 10), (20, 10)]
    );
    assert_eq!(chart.len(), 20);
}

#[tokio::test]
async fn gaps_inside_lookback_are_filled() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let pair = addr(USDC_WETH);
    let last = MOCK_NOW.div_euclid(DAY_SECONDS);
    controller
        .set_chart(
            pair.clone(),
            MockBehavior::Return(vec![day(last), day(last - 5), day(last - 3)]),
        )
        .await;

    let dex = dex_over(mock);
    let chart = dex.pair_chart_data(&pair).await.unwrap();

    let dates: Vec<i64> = chart.iter().map(|d| d.date / DAY_SECONDS).collect();
    assert_eq!(dates, ((last - 5)..=last).collect::<Vec<_>>());
    // filler days carry the reserve of the latest real day before them
    assert!(chart[1].is_synthesized());
    assert_eq!(chart[1].daily_volume_usd, Decimal::ZERO);
    assert_eq!(chart[1].reserve_usd, day(last - 5).reserve_usd);
    assert_eq!(chart[4].reserve_usd, day(last - 3).reserve_usd);
}

#[tokio::test]
async fn history_older_than_a_week_is_filled_without_holes() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let pair = addr(USDC_WETH);
    let last = MOCK_NOW.div_euclid(DAY_SECONDS);
    controller
        .set_chart(
            pair.clone(),
            MockBehavior::Return(vec![day(last - 40), day(last - 2)]),
        )
        .await;

    let dex = dex_over(mock);
    let chart = dex.pair_chart_data(&pair).await.unwrap();

    let dates: Vec<i64> = chart.iter().map(|d| d.date / DAY_SECONDS).collect();
    assert_eq!(dates, ((last - 40)..=last).collect::<Vec<_>>());
    let synthesized = chart.iter().filter(|d| d.is_synthesized()).count();
    assert_eq!(synthesized, 39);
    assert_eq!(chart[20].reserve_usd, day(last - 40).reserve_usd);
    assert_eq!(chart[40].reserve_usd, day(last - 2).reserve_usd);
}

#[tokio::test]
async fn fixture_series_is_contiguous() {
    let dex = fixture_dex();
    let chart = dex.pair_chart_data(&addr(USDC_WETH)).await.unwrap();

    assert!(chart.len() > 1_000);
    assert!(chart.windows(2).all(|w| w[1].date - w[0].date == DAY_SECONDS));
    assert_eq!(chart.last().map(|d| d.date / DAY_SECONDS), Some(MOCK_NOW.div_euclid(DAY_SECONDS)));
    assert!(chart.iter().any(PairDayData::is_synthesized));
}
