use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seconds in one calendar day.
pub const DAY_SECONDS: i64 = 86_400;

/// One daily snapshot of a pair, as charted.
///
/// `id` is `None` on entries synthesized by the gap filler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDayData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unix timestamp of the UTC day boundary.
    #[serde(with = "crate::de::num_str")]
    pub date: i64,
    #[serde(rename = "dailyVolumeUSD", default)]
    pub daily_volume_usd: Decimal,
    #[serde(rename = "reserveUSD", default)]
    pub reserve_usd: Decimal,
    #[serde(rename = "dailyVolumeToken0", default, skip_serializing_if = "Option::is_none")]
    pub daily_volume_token0: Option<Decimal>,
    #[serde(rename = "dailyVolumeToken1", default, skip_serializing_if = "Option::is_none")]
    pub daily_volume_token1: Option<Decimal>,
}

impl PairDayData {
    /// Synthesized entry for a day without trading activity.
    #[must_use]
    pub const fn filler(date: i64, reserve_usd: Decimal) -> Self {
        Self {
            id: None,
            date,
            daily_volume_usd: Decimal::ZERO,
            reserve_usd,
            daily_volume_token0: None,
            daily_volume_token1: None,
        }
    }

    /// Days since the unix epoch.
    #[must_use]
    pub const fn day_index(&self) -> i64 {
        self.date.div_euclid(DAY_SECONDS)
    }

    /// Whether this entry was produced by the gap filler.
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.id.is_none()
    }

    /// `date` as a UTC datetime, if in range.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.date, 0)
    }
}
