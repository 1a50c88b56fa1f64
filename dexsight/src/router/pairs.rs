use std::collections::{BTreeMap, HashMap};

use dexsight_core::{
    Address, BlockRef, Capability, ChangeTimestamps, Decimal, DexError, EnrichedPair,
    FetchPolicy, History, PairSnapshot, enrich_pair,
};

use crate::Dexsight;
use crate::router::macros::provider_call;
use crate::router::util::join_with_deadline;

/// Lookback periods compared against current pair state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    OneDay,
    TwoDay,
    OneWeek,
}

impl Period {
    const ALL: [Self; 3] = [Self::OneDay, Self::TwoDay, Self::OneWeek];

    const fn index(self) -> usize {
        match self {
            Self::OneDay => 0,
            Self::TwoDay => 1,
            Self::OneWeek => 2,
        }
    }
}

/// Block heights at the three lookback timestamps.
#[derive(Debug, Clone, Copy)]
struct LookbackBlocks([u64; 3]);

impl LookbackBlocks {
    fn resolve(ts: &ChangeTimestamps, blocks: &[BlockRef]) -> Result<Self, DexError> {
        let find = |t: i64| {
            blocks
                .iter()
                .find(|b| b.timestamp == t)
                .map(|b| b.number)
                .ok_or_else(|| DexError::not_found(format!("block for timestamp {t}")))
        };
        Ok(Self([find(ts.one_day)?, find(ts.two_day)?, find(ts.one_week)?]))
    }

    const fn at(self, period: Period) -> u64 {
        self.0[period.index()]
    }
}

impl Dexsight {
    /// Reference ETH price in US dollars.
    ///
    /// # Errors
    /// Returns an error if no connector serves prices or the call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dexsight::router", skip(self), err)
    )]
    pub async fn eth_price(&self) -> Result<Decimal, DexError> {
        provider_call!(self, Capability::EthPrice, as_eth_price_provider, |p| p
            .eth_price(FetchPolicy::CacheFirst))
    }

    /// Ids of the top pairs by tracked reserve.
    ///
    /// # Errors
    /// Returns an error if no connector ranks pairs or the call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dexsight::router", skip(self), err)
    )]
    pub async fn top_pair_ids(&self) -> Result<Vec<Address>, DexError> {
        provider_call!(self, Capability::TopPairs, as_top_pairs_provider, |p| p
            .top_pairs(FetchPolicy::CacheFirst))
    }

    /// Enriched data for the top pairs, keyed by pair address.
    ///
    /// Fetches the ETH price and the top pair ids, then runs
    /// [`Dexsight::bulk_pair_data`] over them.
    ///
    /// # Errors
    /// Fails as a whole if any step fails; no partial table is returned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dexsight::router", skip(self), err)
    )]
    pub async fn all_pair_data(&self) -> Result<BTreeMap<Address, EnrichedPair>, DexError> {
        let (eth_price, ids) = futures::try_join!(self.eth_price(), self.top_pair_ids())?;
        let pairs = self.bulk_pair_data(&ids, eth_price).await?;
        Ok(pairs.into_iter().map(|p| (p.pair.id.clone(), p)).collect())
    }

    /// Current state of `ids` merged with their state one day, two days and one
    /// week ago, with derived volume and liquidity metrics.
    ///
    /// The three historical batches run concurrently. A pair missing from a
    /// batch gets an individual lookup at that batch's block; those lookups
    /// also run concurrently. Both fan-outs honor the request deadline.
    ///
    /// # Errors
    /// Fails as a whole if any lookup fails, including a lookback timestamp
    /// with no block (`NotFound`).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "dexsight::router",
            skip(self, ids, eth_price),
            fields(pairs = ids.len(), eth_price = %eth_price),
            err
        )
    )]
    pub async fn bulk_pair_data(
        &self,
        ids: &[Address],
        eth_price: Decimal,
    ) -> Result<Vec<EnrichedPair>, DexError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ts = ChangeTimestamps::at(self.now());
        let found = provider_call!(self, Capability::Blocks, as_block_provider, |p| p
            .blocks_for_timestamps(&ts.as_array(), FetchPolicy::CacheFirst))?;
        let blocks = LookbackBlocks::resolve(&ts, &found)?;

        let current = provider_call!(self, Capability::Pairs, as_pairs_provider, |p| p
            .pairs(ids, FetchPolicy::CacheFirst))?;

        let batches = join_with_deadline(
            Period::ALL.map(|period| self.snapshots_at(ids, blocks.at(period))),
            self.cfg.request_timeout,
            Capability::HistoricalPairs.as_str(),
        )
        .await?;
        let mut history: Vec<HashMap<Address, PairSnapshot>> = Vec::with_capacity(3);
        for batch in batches {
            history.push(batch?.into_iter().map(|s| (s.id.clone(), s)).collect());
        }

        let mut missing = Vec::new();
        for pair in &current {
            for period in Period::ALL {
                if !history[period.index()].contains_key(&pair.id) {
                    missing.push((pair.id.clone(), period));
                }
            }
        }
        if !missing.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(lookups = missing.len(), "falling back to per-pair history");

            let lookups = join_with_deadline(
                missing
                    .into_iter()
                    .map(|(id, period)| self.snapshot_fallback(id, period, blocks.at(period))),
                self.cfg.request_timeout,
                Capability::PairAtBlock.as_str(),
            )
            .await?;
            for res in lookups {
                let (period, snapshot) = res?;
                if let Some(s) = snapshot {
                    history[period.index()].insert(s.id.clone(), s);
                }
            }
        }

        let label = self.cfg.token_label.as_ref();
        Ok(current
            .into_iter()
            .map(|pair| {
                let h = History {
                    one_day: history[Period::OneDay.index()].get(&pair.id),
                    two_day: history[Period::TwoDay.index()].get(&pair.id),
                    one_week: history[Period::OneWeek.index()].get(&pair.id),
                };
                enrich_pair(pair, h, eth_price, label)
            })
            .collect())
    }

    async fn snapshots_at(&self, ids: &[Address], block: u64) -> Result<Vec<PairSnapshot>, DexError> {
        provider_call!(
            self,
            Capability::HistoricalPairs,
            as_historical_pairs_provider,
            |p| p.pairs_at_block(ids, block, FetchPolicy::CacheFirst)
        )
    }

    async fn snapshot_fallback(
        &self,
        id: Address,
        period: Period,
        block: u64,
    ) -> Result<(Period, Option<PairSnapshot>), DexError> {
        let pair = provider_call!(
            self,
            Capability::PairAtBlock,
            as_historical_pairs_provider,
            |p| p.pair_at_block(&id, block, FetchPolicy::CacheFirst)
        )?;
        Ok((period, pair.map(PairSnapshot::from)))
    }
}
