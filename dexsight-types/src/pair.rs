//! Pair (pool) records as returned by the exchange subgraph.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Token descriptor nested inside a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token contract address.
    pub id: Address,
    /// Ticker symbol as indexed.
    pub symbol: String,
    /// Display name as indexed.
    pub name: String,
    /// Total liquidity across all pairs, in token units.
    #[serde(rename = "totalLiquidity", default)]
    pub total_liquidity: Option<Decimal>,
    /// Price of one token in ETH; `None` when absent or outside `Decimal` range.
    #[serde(
        rename = "derivedETH",
        default,
        deserialize_with = "crate::de::lenient_decimal::deserialize"
    )]
    pub derived_eth: Option<Decimal>,
}

/// Current state of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    /// Pair contract address.
    pub id: Address,
    /// First token of the pool.
    pub token0: Token,
    /// Second token of the pool.
    pub token1: Token,
    /// Reserve of `token0`.
    #[serde(default)]
    pub reserve0: Decimal,
    /// Reserve of `token1`.
    #[serde(default)]
    pub reserve1: Decimal,
    /// Pool value in US dollars.
    #[serde(rename = "reserveUSD", default)]
    pub reserve_usd: Decimal,
    /// Pool value in ETH.
    #[serde(rename = "reserveETH", default)]
    pub reserve_eth: Decimal,
    /// Pool value in ETH counting only whitelisted tokens.
    #[serde(rename = "trackedReserveETH", default)]
    pub tracked_reserve_eth: Decimal,
    /// Outstanding LP token supply.
    #[serde(rename = "totalSupply", default)]
    pub total_supply: Decimal,
    /// Lifetime tracked volume in US dollars.
    #[serde(rename = "volumeUSD", default)]
    pub volume_usd: Decimal,
    /// Lifetime volume in US dollars including untracked tokens.
    #[serde(rename = "untrackedVolumeUSD", default)]
    pub untracked_volume_usd: Decimal,
    /// Price of `token0` in units of `token1`.
    ///
    /// Ratios of badly unbalanced pools can fall outside `Decimal` range; those
    /// decode to `None` instead of failing the whole response.
    #[serde(
        rename = "token0Price",
        default,
        deserialize_with = "crate::de::lenient_decimal::deserialize"
    )]
    pub token0_price: Option<Decimal>,
    /// Price of `token1` in units of `token0`; `None` when out of range.
    #[serde(
        rename = "token1Price",
        default,
        deserialize_with = "crate::de::lenient_decimal::deserialize"
    )]
    pub token1_price: Option<Decimal>,
    /// Number of transactions touching the pair.
    #[serde(rename = "txCount", default, with = "crate::de::num_str")]
    pub tx_count: u64,
    /// Unix timestamp of pair creation.
    #[serde(rename = "createdAtTimestamp", default, with = "crate::de::num_str")]
    pub created_at_timestamp: i64,
    /// Block height of pair creation.
    #[serde(rename = "createdAtBlockNumber", default, with = "crate::de::num_str")]
    pub created_at_block_number: u64,
}

/// Historical subset of a pair used for period-over-period comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    /// Pair contract address.
    pub id: Address,
    /// Pool value in US dollars at the snapshot block.
    #[serde(rename = "reserveUSD", default)]
    pub reserve_usd: Decimal,
    /// Tracked pool value in ETH at the snapshot block.
    #[serde(rename = "trackedReserveETH", default)]
    pub tracked_reserve_eth: Decimal,
    /// Lifetime tracked volume at the snapshot block.
    #[serde(rename = "volumeUSD", default)]
    pub volume_usd: Decimal,
    /// Lifetime untracked volume at the snapshot block.
    #[serde(rename = "untrackedVolumeUSD", default)]
    pub untracked_volume_usd: Decimal,
}

impl From<&Pair> for PairSnapshot {
    fn from(p: &Pair) -> Self {
        Self {
            id: p.id.clone(),
            reserve_usd: p.reserve_usd,
            tracked_reserve_eth: p.tracked_reserve_eth,
            volume_usd: p.volume_usd,
            untracked_volume_usd: p.untracked_volume_usd,
        }
    }
}

impl From<Pair> for PairSnapshot {
    fn from(p: Pair) -> Self {
        Self::from(&p)
    }
}

/// A pair plus the derived period metrics shown on the pairs table.
///
/// Serialized flat: the pair fields and the derived fields share one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPair {
    /// Current pair state (token labels may have been rewritten).
    #[serde(flatten)]
    pub pair: Pair,
    /// Tracked volume over the last day.
    #[serde(rename = "oneDayVolumeUSD")]
    pub one_day_volume_usd: Decimal,
    /// Tracked volume over the last week.
    #[serde(rename = "oneWeekVolumeUSD")]
    pub one_week_volume_usd: Decimal,
    /// Percent change of daily tracked volume versus the previous day.
    #[serde(rename = "volumeChangeUSD")]
    pub volume_change_usd: Decimal,
    /// Untracked volume over the last day.
    #[serde(rename = "oneDayVolumeUntracked")]
    pub one_day_volume_untracked: Decimal,
    /// Percent change of daily untracked volume versus the previous day.
    #[serde(rename = "volumeChangeUntracked")]
    pub volume_change_untracked: Decimal,
    /// `trackedReserveETH` converted with the reference ETH price.
    #[serde(rename = "trackedReserveUSD")]
    pub tracked_reserve_usd: Decimal,
    /// Percent change of `reserveUSD` over the last day.
    #[serde(rename = "liquidityChangeUSD")]
    pub liquidity_change_usd: Decimal,
}
