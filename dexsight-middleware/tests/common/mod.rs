use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use dexsight_core::connector::{EthPriceProvider, PairsProvider};
use dexsight_core::{Address, Decimal, DexError, FetchPolicy, Pair, SubgraphConnector};
use dexsight_mock::{FAIL_PAIR, MockConnector};

/// Wraps the fixture connector and counts upstream calls.
pub struct CountingConnector {
    inner: Arc<dyn SubgraphConnector>,
    pub count: Arc<AtomicUsize>,
}

impl CountingConnector {
    pub fn new() -> (Arc<dyn SubgraphConnector>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let me = Self {
            inner: Arc::new(MockConnector::new()),
            count: Arc::clone(&count),
        };
        (Arc::new(me), count)
    }
}

impl SubgraphConnector for CountingConnector {
    fn name(&self) -> &'static str {
        "counting"
    }
    fn vendor(&self) -> &'static str {
        "test"
    }
    fn as_eth_price_provider(&self) -> Option<&dyn EthPriceProvider> {
        Some(self as &dyn EthPriceProvider)
    }
    fn as_pairs_provider(&self) -> Option<&dyn PairsProvider> {
        Some(self as &dyn PairsProvider)
    }
}

#[async_trait::async_trait]
impl EthPriceProvider for CountingConnector {
    async fn eth_price(&self, policy: FetchPolicy) -> Result<Decimal, DexError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner
            .as_eth_price_provider()
            .unwrap()
            .eth_price(policy)
            .await
    }
}

#[async_trait::async_trait]
impl PairsProvider for CountingConnector {
    async fn pairs(&self, ids: &[Address], policy: FetchPolicy) -> Result<Vec<Pair>, DexError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.as_pairs_provider().unwrap().pairs(ids, policy).await
    }
}

pub fn usdc_weth() -> Address {
    Address::from_static("0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc")
}

pub fn failing() -> Address {
    Address::from_static(FAIL_PAIR)
}
