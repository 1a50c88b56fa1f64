use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use dexsight_core::connector::{
    BlockProvider, EthPriceProvider, HistoricalPairsProvider, HourlyRatesProvider,
    PairChartProvider, PairsProvider, SubgraphConnector, TopPairsProvider, TransactionsProvider,
};
use dexsight_core::{
    Address, BlockRef, Capability, Decimal, DexError, FetchPolicy, Pair, PairDayData,
    PairSnapshot, RateSample, Transactions,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(DexError),
    /// Never resolve (simulate a stalled endpoint).
    Hang,
}

/// One recorded connector call, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    TopPairs,
    Pairs(Vec<Address>),
    PairsAtBlock { block: u64, ids: Vec<Address> },
    PairAtBlock { id: Address, block: u64 },
    PairDayDatas { pair: Address, skip: usize, first: usize },
    Transactions { pairs: Option<Vec<Address>>, policy: FetchPolicy },
    RatesAtBlocks { pair: Address, blocks: Vec<BlockRef> },
    Blocks(Vec<i64>),
    EthPrice,
}

#[derive(Default)]
struct InternalState {
    top_pairs: Option<MockBehavior<Vec<Address>>>,
    pairs: Option<MockBehavior<Vec<Pair>>>,
    history: HashMap<u64, MockBehavior<Vec<PairSnapshot>>>,
    point_lookups: HashMap<(Address, u64), MockBehavior<Option<Pair>>>,
    charts: HashMap<Address, MockBehavior<Vec<PairDayData>>>,
    transactions: Option<MockBehavior<Transactions>>,
    rates: HashMap<Address, MockBehavior<Vec<RateSample>>>,
    blocks: Option<MockBehavior<Vec<BlockRef>>>,
    eth_price: Option<MockBehavior<Decimal>>,
    calls: Vec<MockCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    pub async fn set_top_pairs(&self, behavior: MockBehavior<Vec<Address>>) {
        self.state.lock().await.top_pairs = Some(behavior);
    }

    /// Current pair records; each call returns those whose id was requested.
    pub async fn set_pairs(&self, behavior: MockBehavior<Vec<Pair>>) {
        self.state.lock().await.pairs = Some(behavior);
    }

    /// Snapshots served for `pairs_at_block` at `block`, filtered by requested id.
    pub async fn set_history_at(&self, block: u64, behavior: MockBehavior<Vec<PairSnapshot>>) {
        self.state.lock().await.history.insert(block, behavior);
    }

    pub async fn set_pair_at_block(
        &self,
        id: Address,
        block: u64,
        behavior: MockBehavior<Option<Pair>>,
    ) {
        self.state
            .lock()
            .await
            .point_lookups
            .insert((id, block), behavior);
    }

    /// Full daily series for a pair; requests are served page by page from it.
    pub async fn set_chart(&self, pair: Address, behavior: MockBehavior<Vec<PairDayData>>) {
        self.state.lock().await.charts.insert(pair, behavior);
    }

    pub async fn set_transactions(&self, behavior: MockBehavior<Transactions>) {
        self.state.lock().await.transactions = Some(behavior);
    }

    /// Samples for a pair; each call returns those matching a requested block timestamp.
    pub async fn set_rates(&self, pair: Address, behavior: MockBehavior<Vec<RateSample>>) {
        self.state.lock().await.rates.insert(pair, behavior);
    }

    /// Known blocks; each call returns those whose timestamp was requested.
    pub async fn set_blocks(&self, behavior: MockBehavior<Vec<BlockRef>>) {
        self.state.lock().await.blocks = Some(behavior);
    }

    pub async fn set_eth_price(&self, behavior: MockBehavior<Decimal>) {
        self.state.lock().await.eth_price = Some(behavior);
    }

    /// Copy of every call received so far.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        *self.state.lock().await = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Calls without a configured behavior fail with `DexError::Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SubgraphConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SubgraphConnector>, controller)
    }

    // Log the call and snapshot the behavior without holding the lock across awaits
    async fn record<T, F>(&self, call: MockCall, pick: F) -> Option<MockBehavior<T>>
    where
        F: FnOnce(&InternalState) -> Option<MockBehavior<T>>,
    {
        let mut guard = self.state.lock().await;
        guard.calls.push(call);
        pick(&*guard)
    }
}

async fn resolve<T>(behavior: Option<MockBehavior<T>>, cap: Capability) -> Result<T, DexError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Err(DexError::unsupported(cap.as_str())),
    }
}

impl SubgraphConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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
impl TopPairsProvider for DynamicMockConnector {
    async fn top_pairs(&self, _policy: FetchPolicy) -> Result<Vec<Address>, DexError> {
        let b = self.record(MockCall::TopPairs, |s| s.top_pairs.clone()).await;
        resolve(b, Capability::TopPairs).await
    }
}

#[async_trait]
impl PairsProvider for DynamicMockConnector {
    async fn pairs(&self, ids: &[Address], _policy: FetchPolicy) -> Result<Vec<Pair>, DexError> {
        let b = self
            .record(MockCall::Pairs(ids.to_vec()), |s| s.pairs.clone())
            .await;
        let all = resolve(b, Capability::Pairs).await?;
        Ok(all.into_iter().filter(|p| ids.contains(&p.id)).collect())
    }
}

#[async_trait]
impl HistoricalPairsProvider for DynamicMockConnector {
    async fn pairs_at_block(
        &self,
        ids: &[Address],
        block: u64,
        _policy: FetchPolicy,
    ) -> Result<Vec<PairSnapshot>, DexError> {
        let call = MockCall::PairsAtBlock {
            block,
            ids: ids.to_vec(),
        };
        let b = self.record(call, |s| s.history.get(&block).cloned()).await;
        let all = resolve(b, Capability::HistoricalPairs).await?;
        Ok(all.into_iter().filter(|p| ids.contains(&p.id)).collect())
    }

    async fn pair_at_block(
        &self,
        id: &Address,
        block: u64,
        _policy: FetchPolicy,
    ) -> Result<Option<Pair>, DexError> {
        let call = MockCall::PairAtBlock {
            id: id.clone(),
            block,
        };
        let key = (id.clone(), block);
        let b = self
            .record(call, |s| s.point_lookups.get(&key).cloned())
            .await;
        resolve(b, Capability::PairAtBlock).await
    }
}

#[async_trait]
impl PairChartProvider for DynamicMockConnector {
    async fn pair_day_datas(
        &self,
        pair: &Address,
        skip: usize,
        first: usize,
        _policy: FetchPolicy,
    ) -> Result<Vec<PairDayData>, DexError> {
        let call = MockCall::PairDayDatas {
            pair: pair.clone(),
            skip,
            first,
        };
        let b = self.record(call, |s| s.charts.get(pair).cloned()).await;
        let all = resolve(b, Capability::PairChart).await?;
        Ok(all.into_iter().skip(skip).take(first).collect())
    }
}

#[async_trait]
impl TransactionsProvider for DynamicMockConnector {
    async fn transactions(
        &self,
        pairs: Option<&[Address]>,
        policy: FetchPolicy,
    ) -> Result<Transactions, DexError> {
        let call = MockCall::Transactions {
            pairs: pairs.map(<[Address]>::to_vec),
            policy,
        };
        let b = self.record(call, |s| s.transactions.clone()).await;
        resolve(b, Capability::Transactions).await
    }
}

#[async_trait]
impl HourlyRatesProvider for DynamicMockConnector {
    async fn rates_at_blocks(
        &self,
        pair: &Address,
        blocks: &[BlockRef],
        _policy: FetchPolicy,
    ) -> Result<Vec<RateSample>, DexError> {
        let call = MockCall::RatesAtBlocks {
            pair: pair.clone(),
            blocks: blocks.to_vec(),
        };
        let b = self.record(call, |s| s.rates.get(pair).cloned()).await;
        let all = resolve(b, Capability::HourlyRates).await?;
        Ok(all
            .into_iter()
            .filter(|r| blocks.iter().any(|b| b.timestamp == r.timestamp))
            .collect())
    }
}

#[async_trait]
impl BlockProvider for DynamicMockConnector {
    async fn blocks_for_timestamps(
        &self,
        timestamps: &[i64],
        _policy: FetchPolicy,
    ) -> Result<Vec<BlockRef>, DexError> {
        let b = self
            .record(MockCall::Blocks(timestamps.to_vec()), |s| s.blocks.clone())
            .await;
        let all = resolve(b, Capability::Blocks).await?;
        Ok(all
            .into_iter()
            .filter(|b| timestamps.contains(&b.timestamp))
            .collect())
    }
}

#[async_trait]
impl EthPriceProvider for DynamicMockConnector {
    async fn eth_price(&self, _policy: FetchPolicy) -> Result<Decimal, DexError> {
        let b = self.record(MockCall::EthPrice, |s| s.eth_price.clone()).await;
        resolve(b, Capability::EthPrice).await
    }
}
