use dexsight_core::{Address, DAY_SECONDS, Decimal, PairDayData};

use super::pairs;

/// Daily snapshots from creation up to `now`, with every tenth day missing.
pub fn day_datas(id: &Address, now: i64) -> Vec<PairDayData> {
    let Some(p) = pairs::current(id) else {
        return Vec::new();
    };
    let first = p.created_at_timestamp.div_euclid(DAY_SECONDS);
    let last = now.div_euclid(DAY_SECONDS);
    (first..=last)
        .filter(|day| day % 10 != 7)
        .map(|day| PairDayData {
            id: Some(format!("{}-{day}", id.as_str())),
            date: day * DAY_SECONDS,
            daily_volume_usd: Decimal::from(10_000 + (day % 17) * 1_000),
            reserve_usd: Decimal::from(1_000_000 + (day - first) * 500),
            daily_volume_token0: None,
            daily_volume_token1: None,
        })
        .collect()
}
