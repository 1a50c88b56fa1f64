use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use dexsight_core::connector::{
    BlockProvider, EthPriceProvider, HistoricalPairsProvider, HourlyRatesProvider,
    PairChartProvider, PairsProvider, TopPairsProvider, TransactionsProvider,
};
use dexsight_core::{
    Address, BlockRef, CacheConfig, Capability, Decimal, DexError, FetchPolicy, Middleware, Pair,
    PairDayData, PairSnapshot, RateSample, SubgraphConnector, Transactions,
};
use moka::future::Cache;

type Store<K, V> = Cache<K, Arc<V>>;

/// Declarative layer that adds a response cache when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn SubgraphConnector>) -> Arc<dyn SubgraphConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CacheMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "default_ttl_ms": self.cfg.default_ttl_ms,
            "default_max_entries": self.cfg.default_max_entries,
            "per_capability_ttl_ms": self.cfg.per_capability_ttl_ms,
            "per_capability_max_entries": self.cfg.per_capability_max_entries,
        })
    }
}

// Per-capability typed stores; `None` means disabled (TTL of zero).
struct Stores {
    top_pairs: Option<Store<(), Vec<Address>>>,
    pairs: Option<Store<Vec<Address>, Vec<Pair>>>,
    historical: Option<Store<(Vec<Address>, u64), Vec<PairSnapshot>>>,
    pair_at_block: Option<Store<(Address, u64), Option<Pair>>>,
    chart: Option<Store<(Address, usize, usize), Vec<PairDayData>>>,
    transactions: Option<Store<Option<Vec<Address>>, Transactions>>,
    rates: Option<Store<(Address, Vec<BlockRef>), Vec<RateSample>>>,
    blocks: Option<Store<Vec<i64>, Vec<BlockRef>>>,
    eth_price: Option<Store<(), Decimal>>,
}

/// Connector wrapper that serves repeated reads from memory.
///
/// Reads honor the per-call `FetchPolicy`: `CacheFirst` returns a live entry
/// or fetches and stores the result; `NoCache` always reaches the inner
/// connector and leaves the cache untouched. Errors are never cached.
pub struct CachingConnector {
    inner: Arc<dyn SubgraphConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn store<K, V>(cfg: &CacheConfig, cap: Capability) -> Option<Store<K, V>>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap.as_str());
        if ttl.is_zero() {
            return None;
        }
        Some(
            Cache::builder()
                .max_capacity(cfg.max_entries_for(cap.as_str()))
                .time_to_live(ttl)
                .build(),
        )
    }

    #[must_use]
    pub fn new(inner: Arc<dyn SubgraphConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            top_pairs: Self::store(cfg, Capability::TopPairs),
            pairs: Self::store(cfg, Capability::Pairs),
            historical: Self::store(cfg, Capability::HistoricalPairs),
            pair_at_block: Self::store(cfg, Capability::PairAtBlock),
            chart: Self::store(cfg, Capability::PairChart),
            transactions: Self::store(cfg, Capability::Transactions),
            rates: Self::store(cfg, Capability::HourlyRates),
            blocks: Self::store(cfg, Capability::Blocks),
            eth_price: Self::store(cfg, Capability::EthPrice),
        };
        Self { inner, stores }
    }
}

async fn read_through<K, V, F>(
    store: Option<&Store<K, V>>,
    key: K,
    policy: FetchPolicy,
    fetch: F,
) -> Result<V, DexError>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    F: Future<Output = Result<V, DexError>>,
{
    let Some(store) = store else {
        return fetch.await;
    };
    if !policy.reads_cache() {
        return fetch.await;
    }
    if let Some(hit) = store.get(&key).await {
        #[cfg(feature = "tracing")]
        tracing::trace!("cache hit");
        return Ok((*hit).clone());
    }
    let value = fetch.await?;
    store.insert(key, Arc::new(value.clone())).await;
    Ok(value)
}

impl SubgraphConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    dexsight_core::subgraph_connector_accessors!(inner);
}

#[async_trait]
impl TopPairsProvider for CachingConnector {
    async fn top_pairs(&self, policy: FetchPolicy) -> Result<Vec<Address>, DexError> {
        let inner = self
            .inner
            .as_top_pairs_provider()
            .ok_or_else(|| DexError::unsupported(Capability::TopPairs.as_str()))?;
        read_through(self.stores.top_pairs.as_ref(), (), policy, inner.top_pairs(policy)).await
    }
}

#[async_trait]
impl PairsProvider for CachingConnector {
    async fn pairs(&self, ids: &[Address], policy: FetchPolicy) -> Result<Vec<Pair>, DexError> {
        let inner = self
            .inner
            .as_pairs_provider()
            .ok_or_else(|| DexError::unsupported(Capability::Pairs.as_str()))?;
        read_through(
            self.stores.pairs.as_ref(),
            ids.to_vec(),
            policy,
            inner.pairs(ids, policy),
        )
        .await
    }
}

#[async_trait]
impl HistoricalPairsProvider for CachingConnector {
    async fn pairs_at_block(
        &self,
        ids: &[Address],
        block: u64,
        policy: FetchPolicy,
    ) -> Result<Vec<PairSnapshot>, DexError> {
        let inner = self
            .inner
            .as_historical_pairs_provider()
            .ok_or_else(|| DexError::unsupported(Capability::HistoricalPairs.as_str()))?;
        read_through(
            self.stores.historical.as_ref(),
            (ids.to_vec(), block),
            policy,
            inner.pairs_at_block(ids, block, policy),
        )
        .await
    }

    async fn pair_at_block(
        &self,
        id: &Address,
        block: u64,
        policy: FetchPolicy,
    ) -> Result<Option<Pair>, DexError> {
        let inner = self
            .inner
            .as_historical_pairs_provider()
            .ok_or_else(|| DexError::unsupported(Capability::PairAtBlock.as_str()))?;
        read_through(
            self.stores.pair_at_block.as_ref(),
            (id.clone(), block),
            policy,
            inner.pair_at_block(id, block, policy),
        )
        .await
    }
}

#[async_trait]
impl PairChartProvider for CachingConnector {
    async fn pair_day_datas(
        &self,
        pair: &Address,
        skip: usize,
        first: usize,
        policy: FetchPolicy,
    ) -> Result<Vec<PairDayData>, DexError> {
        let inner = self
            .inner
            .as_pair_chart_provider()
            .ok_or_else(|| DexError::unsupported(Capability::PairChart.as_str()))?;
        read_through(
            self.stores.chart.as_ref(),
            (pair.clone(), skip, first),
            policy,
            inner.pair_day_datas(pair, skip, first, policy),
        )
        .await
    }
}

#[async_trait]
impl TransactionsProvider for CachingConnector {
    async fn transactions(
        &self,
        pairs: Option<&[Address]>,
        policy: FetchPolicy,
    ) -> Result<Transactions, DexError> {
        let inner = self
            .inner
            .as_transactions_provider()
            .ok_or_else(|| DexError::unsupported(Capability::Transactions.as_str()))?;
        read_through(
            self.stores.transactions.as_ref(),
            pairs.map(<[Address]>::to_vec),
            policy,
            inner.transactions(pairs, policy),
        )
        .await
    }
}

#[async_trait]
impl HourlyRatesProvider for CachingConnector {
    async fn rates_at_blocks(
        &self,
        pair: &Address,
        blocks: &[BlockRef],
        policy: FetchPolicy,
    ) -> Result<Vec<RateSample>, DexError> {
        let inner = self
            .inner
            .as_hourly_rates_provider()
            .ok_or_else(|| DexError::unsupported(Capability::HourlyRates.as_str()))?;
        read_through(
            self.stores.rates.as_ref(),
            (pair.clone(), blocks.to_vec()),
            policy,
            inner.rates_at_blocks(pair, blocks, policy),
        )
        .await
    }
}

#[async_trait]
impl BlockProvider for CachingConnector {
    async fn blocks_for_timestamps(
        &self,
        timestamps: &[i64],
        policy: FetchPolicy,
    ) -> Result<Vec<BlockRef>, DexError> {
        let inner = self
            .inner
            .as_block_provider()
            .ok_or_else(|| DexError::unsupported(Capability::Blocks.as_str()))?;
        read_through(
            self.stores.blocks.as_ref(),
            timestamps.to_vec(),
            policy,
            inner.blocks_for_timestamps(timestamps, policy),
        )
        .await
    }
}

#[async_trait]
impl EthPriceProvider for CachingConnector {
    async fn eth_price(&self, policy: FetchPolicy) -> Result<Decimal, DexError> {
        let inner = self
            .inner
            .as_eth_price_provider()
            .ok_or_else(|| DexError::unsupported(Capability::EthPrice.as_str()))?;
        read_through(self.stores.eth_price.as_ref(), (), policy, inner.eth_price(policy)).await
    }
}
