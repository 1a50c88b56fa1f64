use async_trait::async_trait;
use dexsight_core::connector::{
    BlockProvider, EthPriceProvider, HistoricalPairsProvider, HourlyRatesProvider,
    PairChartProvider, PairsProvider, SubgraphConnector, TopPairsProvider, TransactionsProvider,
};
use dexsight_core::{
    Address, BlockRef, Decimal, DexError, FetchPolicy, Pair, PairDayData, PairSnapshot,
    RateSample, Transactions,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

/// Wall-clock time the fixtures are anchored to (2023-11-14T22:13:20Z).
pub const MOCK_NOW: i64 = 1_700_000_000;
/// Block height at `MOCK_NOW`.
pub const HEAD_BLOCK: u64 = 18_570_000;
/// Seconds between fixture blocks.
pub const BLOCK_TIME: i64 = 12;
/// Wrapped ether, token1 of every fixture pair.
pub const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
/// Any request touching this pair fails with a connector error.
pub const FAIL_PAIR: &str = "0x000000000000000000000000000000000000fa11";
/// Any request touching this pair stalls briefly before answering.
pub const SLOW_PAIR: &str = "0x0000000000000000000000000000000000005105";

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Three pairs are known (USDC/WETH, WBTC/WETH and a PEPE/WETH pair created
/// ten hours before `MOCK_NOW`). Blocks advance every `BLOCK_TIME` seconds up to
/// `HEAD_BLOCK`; timestamps after `MOCK_NOW` have no block.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Block height for a timestamp, if one had been mined by then.
    #[must_use]
    pub fn block_at(timestamp: i64) -> Option<u64> {
        if timestamp > MOCK_NOW {
            return None;
        }
        let behind = u64::try_from((MOCK_NOW - timestamp) / BLOCK_TIME).ok()?;
        HEAD_BLOCK.checked_sub(behind)
    }

    async fn maybe_fail_or_stall<'a, I>(ids: I, capability: &'static str) -> Result<(), DexError>
    where
        I: IntoIterator<Item = &'a Address>,
    {
        for id in ids {
            match id.as_str() {
                FAIL_PAIR => {
                    return Err(DexError::connector(
                        "dexsight-mock",
                        format!("forced failure: {capability}"),
                    ));
                }
                SLOW_PAIR => tokio::time::sleep(std::time::Duration::from_millis(200)).await,
                _ => {}
            }
        }
        Ok(())
    }
}

impl SubgraphConnector for MockConnector {
    fn name(&self) -> &'static str {
        "dexsight-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_top_pairs_provider(&self) -> Option<&dyn TopPairsProvider> {
        Some(self as &dyn TopPairsProvider)
    }
    fn as_pairs_provider(&self) -> Option<&dyn PairsProvider> {
        Some(self as &dyn PairsProvider)
    }
    fn as_historical_pairs_provider(&self) -> Option<&dyn HistoricalPairsProvider> {
        Some(self as &dyn HistoricalPairsProvider)
    }
    fn as_pair_chart_provider(&self) -> Option<&dyn PairChartProvider> {
        Some(self as &dyn PairChartProvider)
    }
    fn as_transactions_provider(&self) -> Option<&dyn TransactionsProvider> {
        Some(self as &dyn TransactionsProvider)
    }
    fn as_hourly_rates_provider(&self) -> Option<&dyn HourlyRatesProvider> {
        Some(self as &dyn HourlyRatesProvider)
    }
    fn as_block_provider(&self) -> Option<&dyn BlockProvider> {
        Some(self as &dyn BlockProvider)
    }
    fn as_eth_price_provider(&self) -> Option<&dyn EthPriceProvider> {
        Some(self as &dyn EthPriceProvider)
    }
}

#[async_trait]
impl TopPairsProvider for MockConnector {
    async fn top_pairs(&self, _policy: FetchPolicy) -> Result<Vec<Address>, DexError> {
        Ok(fixtures::pairs::top_ids())
    }
}

#[async_trait]
impl PairsProvider for MockConnector {
    async fn pairs(&self, ids: &[Address], _policy: FetchPolicy) -> Result<Vec<Pair>, DexError> {
        Self::maybe_fail_or_stall(ids, "pairs").await?;
        Ok(ids.iter().filter_map(fixtures::pairs::current).collect())
    }
}

#[async_trait]
impl HistoricalPairsProvider for MockConnector {
    async fn pairs_at_block(
        &self,
        ids: &[Address],
        block: u64,
        _policy: FetchPolicy,
    ) -> Result<Vec<PairSnapshot>, DexError> {
        Self::maybe_fail_or_stall(ids, "historical-pairs").await?;
        Ok(ids
            .iter()
            .filter_map(|id| fixtures::pairs::snapshot_at_block(id, block))
            .collect())
    }

    async fn pair_at_block(
        &self,
        id: &Address,
        block: u64,
        _policy: FetchPolicy,
    ) -> Result<Option<Pair>, DexError> {
        Self::maybe_fail_or_stall([id], "pair-at-block").await?;
        Ok(fixtures::pairs::at_block(id, block))
    }
}

#[async_trait]
impl PairChartProvider for MockConnector {
    async fn pair_day_datas(
        &self,
        pair: &Address,
        skip: usize,
        first: usize,
        _policy: FetchPolicy,
    ) -> Result<Vec<PairDayData>, DexError> {
        Self::maybe_fail_or_stall([pair], "pair-chart").await?;
        Ok(fixtures::chart::day_datas(pair, MOCK_NOW)
            .into_iter()
            .skip(skip)
            .take(first)
            .collect())
    }
}

#[async_trait]
impl TransactionsProvider for MockConnector {
    async fn transactions(
        &self,
        pairs: Option<&[Address]>,
        _policy: FetchPolicy,
    ) -> Result<Transactions, DexError> {
        match pairs {
            Some(ids) => {
                Self::maybe_fail_or_stall(ids, "transactions").await?;
                Ok(fixtures::events::for_pairs(ids))
            }
            None => Ok(fixtures::events::for_pairs(&fixtures::pairs::top_ids())),
        }
    }
}

#[async_trait]
impl HourlyRatesProvider for MockConnector {
    async fn rates_at_blocks(
        &self,
        pair: &Address,
        blocks: &[BlockRef],
        _policy: FetchPolicy,
    ) -> Result<Vec<RateSample>, DexError> {
        Self::maybe_fail_or_stall([pair], "hourly-rates").await?;
        Ok(blocks
            .iter()
            .filter_map(|b| {
                fixtures::pairs::prices_at_block(pair, b.number).map(|(p0, p1)| RateSample {
                    timestamp: b.timestamp,
                    token0_price: p0,
                    token1_price: p1,
                })
            })
            .collect())
    }
}

#[async_trait]
impl BlockProvider for MockConnector {
    async fn blocks_for_timestamps(
        &self,
        timestamps: &[i64],
        _policy: FetchPolicy,
    ) -> Result<Vec<BlockRef>, DexError> {
        Ok(timestamps
            .iter()
            .filter_map(|&t| Self::block_at(t).map(|n| BlockRef::new(t, n)))
            .collect())
    }
}

#[async_trait]
impl EthPriceProvider for MockConnector {
    async fn eth_price(&self, _policy: FetchPolicy) -> Result<Decimal, DexError> {
        Ok(Decimal::from(2_045))
    }
}
