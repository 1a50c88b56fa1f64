use async_trait::async_trait;

use dexsight_types::{
    Address, BlockRef, Capability, Decimal, DexError, FetchPolicy, Pair, PairDayData,
    PairSnapshot, RateSample, Transactions,
};

/// Role trait for connectors that rank pairs by tracked reserve.
#[async_trait]
pub trait TopPairsProvider: Send + Sync {
    /// Ids of the top pairs by `trackedReserveETH`, highest first.
    async fn top_pairs(&self, policy: FetchPolicy) -> Result<Vec<Address>, DexError>;
}

/// Role trait for connectors that return the current state of pairs.
#[async_trait]
pub trait PairsProvider: Send + Sync {
    /// Current records for `ids`. Unknown ids are absent from the result.
    async fn pairs(&self, ids: &[Address], policy: FetchPolicy) -> Result<Vec<Pair>, DexError>;
}

/// Role trait for connectors that can read pair state at a past block.
#[async_trait]
pub trait HistoricalPairsProvider: Send + Sync {
    /// Snapshots of `ids` at `block`. Pairs that did not exist yet are absent.
    async fn pairs_at_block(
        &self,
        ids: &[Address],
        block: u64,
        policy: FetchPolicy,
    ) -> Result<Vec<PairSnapshot>, DexError>;

    /// Point lookup of a single pair at `block`.
    async fn pair_at_block(
        &self,
        id: &Address,
        block: u64,
        policy: FetchPolicy,
    ) -> Result<Option<Pair>, DexError>;
}

/// Role trait for connectors that page through a pair's daily snapshots.
#[async_trait]
pub trait PairChartProvider: Send + Sync {
    /// One page of daily snapshots ordered by date ascending.
    async fn pair_day_datas(
        &self,
        pair: &Address,
        skip: usize,
        first: usize,
        policy: FetchPolicy,
    ) -> Result<Vec<PairDayData>, DexError>;
}

/// Role trait for connectors that list recent mints, burns and swaps.
#[async_trait]
pub trait TransactionsProvider: Send + Sync {
    /// Latest events, restricted to `pairs` when given.
    async fn transactions(
        &self,
        pairs: Option<&[Address]>,
        policy: FetchPolicy,
    ) -> Result<Transactions, DexError>;
}

/// Role trait for connectors that sample pair prices at given blocks.
#[async_trait]
pub trait HourlyRatesProvider: Send + Sync {
    /// `token0Price`/`token1Price` of `pair` at each block, tagged with the block's timestamp.
    ///
    /// Blocks where the pair did not exist are skipped.
    async fn rates_at_blocks(
        &self,
        pair: &Address,
        blocks: &[BlockRef],
        policy: FetchPolicy,
    ) -> Result<Vec<RateSample>, DexError>;
}

/// Role trait for connectors that map wall-clock timestamps to block heights.
#[async_trait]
pub trait BlockProvider: Send + Sync {
    /// First block after each timestamp. Timestamps without a block are omitted.
    async fn blocks_for_timestamps(
        &self,
        timestamps: &[i64],
        policy: FetchPolicy,
    ) -> Result<Vec<BlockRef>, DexError>;
}

/// Role trait for connectors that report the reference ETH price.
#[async_trait]
pub trait EthPriceProvider: Send + Sync {
    /// ETH price in US dollars.
    async fn eth_price(&self, policy: FetchPolicy) -> Result<Decimal, DexError>;
}

/// Main connector trait implemented by subgraph backends. Exposes capability discovery.
pub trait SubgraphConnector: Send + Sync {
    /// Stable identifier used in logs and errors (e.g. "dexsight-subgraph").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    fn as_top_pairs_provider(&self) -> Option<&dyn TopPairsProvider> {
        None
    }
    fn as_pairs_provider(&self) -> Option<&dyn PairsProvider> {
        None
    }
    fn as_historical_pairs_provider(&self) -> Option<&dyn HistoricalPairsProvider> {
        None
    }
    fn as_pair_chart_provider(&self) -> Option<&dyn PairChartProvider> {
        None
    }
    fn as_transactions_provider(&self) -> Option<&dyn TransactionsProvider> {
        None
    }
    fn as_hourly_rates_provider(&self) -> Option<&dyn HourlyRatesProvider> {
        None
    }
    fn as_block_provider(&self) -> Option<&dyn BlockProvider> {
        None
    }
    fn as_eth_price_provider(&self) -> Option<&dyn EthPriceProvider> {
        None
    }

    /// Whether the connector advertises `capability`.
    ///
    /// `HistoricalPairs` and `PairAtBlock` are served by the same role trait.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::TopPairs => self.as_top_pairs_provider().is_some(),
            Capability::Pairs => self.as_pairs_provider().is_some(),
            Capability::HistoricalPairs | Capability::PairAtBlock => {
                self.as_historical_pairs_provider().is_some()
            }
            Capability::PairChart => self.as_pair_chart_provider().is_some(),
            Capability::Transactions => self.as_transactions_provider().is_some(),
            Capability::HourlyRates => self.as_hourly_rates_provider().is_some(),
            Capability::Blocks => self.as_block_provider().is_some(),
            Capability::EthPrice => self.as_eth_price_provider().is_some(),
            _ => false,
        }
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `SubgraphConnector` by delegating to an inner field.
///
/// The wrapper must implement every role trait itself; an accessor returns the
/// wrapper only when the inner connector advertises the same role.
#[macro_export]
macro_rules! subgraph_connector_accessors {
    ($inner:ident) => {
        fn as_top_pairs_provider(&self) -> Option<&dyn $crate::connector::TopPairsProvider> {
            self.$inner
                .as_top_pairs_provider()
                .map(|_| self as &dyn $crate::connector::TopPairsProvider)
        }
        fn as_pairs_provider(&self) -> Option<&dyn $crate::connector::PairsProvider> {
            self.$inner
                .as_pairs_provider()
                .map(|_| self as &dyn $crate::connector::PairsProvider)
        }
        fn as_historical_pairs_provider(
            &self,
        ) -> Option<&dyn $crate::connector::HistoricalPairsProvider> {
            self.$inner
                .as_historical_pairs_provider()
                .map(|_| self as &dyn $crate::connector::HistoricalPairsProvider)
        }
        fn as_pair_chart_provider(&self) -> Option<&dyn $crate::connector::PairChartProvider> {
            self.$inner
                .as_pair_chart_provider()
                .map(|_| self as &dyn $crate::connector::PairChartProvider)
        }
        fn as_transactions_provider(
            &self,
        ) -> Option<&dyn $crate::connector::TransactionsProvider> {
            self.$inner
                .as_transactions_provider()
                .map(|_| self as &dyn $crate::connector::TransactionsProvider)
        }
        fn as_hourly_rates_provider(
            &self,
        ) -> Option<&dyn $crate::connector::HourlyRatesProvider> {
            self.$inner
                .as_hourly_rates_provider()
                .map(|_| self as &dyn $crate::connector::HourlyRatesProvider)
        }
        fn as_block_provider(&self) -> Option<&dyn $crate::connector::BlockProvider> {
            self.$inner
                .as_block_provider()
                .map(|_| self as &dyn $crate::connector::BlockProvider)
        }
        fn as_eth_price_provider(&self) -> Option<&dyn $crate::connector::EthPriceProvider> {
            self.$inner
                .as_eth_price_provider()
                .map(|_| self as &dyn $crate::connector::EthPriceProvider)
        }
    };
}
