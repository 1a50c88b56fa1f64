//! dexsight-subgraph
//!
//! Connector that implements `SubgraphConnector` over HTTP against a
//! Uniswap-v2 style exchange subgraph and an Ethereum blocks subgraph.
//! Exposes top pairs, current and historical pair state, daily chart pages,
//! recent transactions, hourly price samples, block lookups and the ETH price.
#![warn(missing_docs)]

/// Builder for `GraphConnector`.
pub mod builder;
/// Endpoint configuration.
pub mod config;
/// GraphQL documents.
pub mod queries;
/// Chunked aliased queries.
pub mod split;
/// HTTP transport and the injectable transport trait.
pub mod transport;

use std::sync::Arc;

use async_trait::async_trait;
use dexsight_core::connector::{
    BlockProvider, EthPriceProvider, HistoricalPairsProvider, HourlyRatesProvider,
    PairChartProvider, PairsProvider, SubgraphConnector, TopPairsProvider, TransactionsProvider,
};
use dexsight_core::{
    Address, BlockRef, Decimal, DexError, FetchPolicy, Pair, PairDayData, PairSnapshot,
    RateSample, Transactions,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use builder::GraphConnectorBuilder;
pub use config::SubgraphEndpoints;
pub use split::split_query;
pub use transport::{GraphTransport, GraphqlRequest, HttpTransport};

/// Name reported by the connector and attached to its transport errors.
pub const CONNECTOR_NAME: &str = "dexsight-subgraph";

/// Subgraph-backed connector. Construct with [`GraphConnector::builder`].
pub struct GraphConnector {
    transport: Arc<dyn GraphTransport>,
    endpoints: SubgraphEndpoints,
    chunk: usize,
}

#[derive(Deserialize)]
struct IdRow {
    id: Address,
}

#[derive(Deserialize)]
struct BlockRow {
    #[serde(deserialize_with = "dexsight_core::de::num_str::deserialize")]
    number: u64,
}

#[derive(Deserialize)]
struct PriceRow {
    #[serde(
        rename = "token0Price",
        default,
        deserialize_with = "dexsight_core::de::lenient_decimal::deserialize"
    )]
    token0_price: Option<Decimal>,
    #[serde(
        rename = "token1Price",
        default,
        deserialize_with = "dexsight_core::de::lenient_decimal::deserialize"
    )]
    token1_price: Option<Decimal>,
}

#[derive(Deserialize)]
struct Bundle {
    #[serde(rename = "ethPrice")]
    eth_price: Decimal,
}

fn take<T: DeserializeOwned>(data: &mut Value, key: &str) -> Result<T, DexError> {
    let raw = data
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| DexError::Data(format!("missing `{key}` in response")))?;
    Ok(serde_json::from_value(raw)?)
}

impl GraphConnector {
    pub(crate) fn from_parts(
        transport: Arc<dyn GraphTransport>,
        endpoints: SubgraphEndpoints,
        chunk: usize,
    ) -> Self {
        Self {
            transport,
            endpoints,
            chunk: chunk.max(1),
        }
    }

    /// Endpoints this connector queries.
    #[must_use]
    pub const fn endpoints(&self) -> &SubgraphEndpoints {
        &self.endpoints
    }

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("404") || m.contains("not found") || m.contains("does not exist")
    }

    /// Map transport-level failures onto the shared error vocabulary.
    ///
    /// Unknown subgraphs and blocks the indexer has not reached yet become
    /// `NotFound`; opaque errors are attributed to this connector.
    fn normalize_error(e: DexError, what: &str) -> DexError {
        match e {
            DexError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    DexError::not_found(what.to_string())
                } else {
                    DexError::connector(CONNECTOR_NAME, msg)
                }
            }
            DexError::Graphql { messages }
                if messages.iter().any(|m| m.contains("indexed up to block")) =>
            {
                DexError::not_found(what.to_string())
            }
            DexError::Other(msg) => DexError::connector(CONNECTOR_NAME, msg),
            other => other,
        }
    }

    async fn exchange(&self, req: &GraphqlRequest, what: &str) -> Result<Value, DexError> {
        self.transport
            .query(&self.endpoints.exchange, req)
            .await
            .map_err(|e| Self::normalize_error(e, what))
    }

    async fn blocks_subgraph(&self, req: &GraphqlRequest, what: &str) -> Result<Value, DexError> {
        self.transport
            .query(&self.endpoints.blocks, req)
            .await
            .map_err(|e| Self::normalize_error(e, what))
    }
}

#[async_trait]
impl TopPairsProvider for GraphConnector {
    async fn top_pairs(&self, _policy: FetchPolicy) -> Result<Vec<Address>, DexError> {
        let mut data = self.exchange(&queries::top_pairs(), "top pairs").await?;
        let rows: Vec<IdRow> = take(&mut data, "pairs")?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }
}

#[async_trait]
impl PairsProvider for GraphConnector {
    async fn pairs(&self, ids: &[Address], _policy: FetchPolicy) -> Result<Vec<Pair>, DexError> {
        let mut out = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(queries::MAX_PAGE) {
            let mut data = self.exchange(&queries::pairs_bulk(chunk), "pairs").await?;
            out.extend(take::<Vec<Pair>>(&mut data, "pairs")?);
        }
        Ok(out)
    }
}

#[async_trait]
impl HistoricalPairsProvider for GraphConnector {
    async fn pairs_at_block(
        &self,
        ids: &[Address],
        block: u64,
        _policy: FetchPolicy,
    ) -> Result<Vec<PairSnapshot>, DexError> {
        let what = format!("pairs at block {block}");
        let mut out = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(queries::MAX_PAGE) {
            let mut data = self
                .exchange(&queries::pairs_historical_bulk(chunk, block), &what)
                .await?;
            out.extend(take::<Vec<PairSnapshot>>(&mut data, "pairs")?);
        }
        Ok(out)
    }

    async fn pair_at_block(
        &self,
        id: &Address,
        block: u64,
        _policy: FetchPolicy,
    ) -> Result<Option<Pair>, DexError> {
        let what = format!("pair {id} at block {block}");
        let mut data = self
            .exchange(&queries::pair_at_block(id, block), &what)
            .await?;
        let rows: Vec<Pair> = take(&mut data, "pairs")?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl PairChartProvider for GraphConnector {
    async fn pair_day_datas(
        &self,
        pair: &Address,
        skip: usize,
        first: usize,
        _policy: FetchPolicy,
    ) -> Result<Vec<PairDayData>, DexError> {
        let what = format!("day data for {pair}");
        let mut data = self
            .exchange(&queries::pair_chart(pair, skip, first), &what)
            .await?;
        take(&mut data, "pairDayDatas")
    }
}

#[async_trait]
impl TransactionsProvider for GraphConnector {
    async fn transactions(
        &self,
        pairs: Option<&[Address]>,
        _policy: FetchPolicy,
    ) -> Result<Transactions, DexError> {
        let req = pairs.map_or_else(queries::all_transactions, queries::filtered_transactions);
        let data = self.exchange(&req, "transactions").await?;
        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl HourlyRatesProvider for GraphConnector {
    async fn rates_at_blocks(
        &self,
        pair: &Address,
        blocks: &[BlockRef],
        _policy: FetchPolicy,
    ) -> Result<Vec<RateSample>, DexError> {
        let what = format!("rates for {pair}");
        let merged = split_query(blocks, self.chunk, |slice| {
            let req = queries::hourly_pair_rates(pair, slice);
            let what = what.clone();
            async move { self.exchange(&req, &what).await }
        })
        .await?;

        let mut samples = Vec::with_capacity(merged.len());
        for (alias, row) in merged {
            let Some(timestamp) = queries::alias_timestamp(&alias) else {
                continue;
            };
            // null when the pair did not exist at that block
            if row.is_null() {
                continue;
            }
            let row: PriceRow = serde_json::from_value(row)?;
            // a ratio outside Decimal range drops that sample only
            let (Some(token0_price), Some(token1_price)) = (row.token0_price, row.token1_price)
            else {
                #[cfg(feature = "tracing")]
                tracing::warn!(%pair, %alias, "price ratio out of decimal range, sample skipped");
                continue;
            };
            samples.push(RateSample {
                timestamp,
                token0_price,
                token1_price,
            });
        }
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}

#[async_trait]
impl BlockProvider for GraphConnector {
    async fn blocks_for_timestamps(
        &self,
        timestamps: &[i64],
        _policy: FetchPolicy,
    ) -> Result<Vec<BlockRef>, DexError> {
        let merged = split_query(timestamps, self.chunk, |slice| {
            let req = queries::blocks(slice);
            async move { self.blocks_subgraph(&req, "blocks").await }
        })
        .await?;

        let mut out = Vec::with_capacity(merged.len());
        for (alias, rows) in merged {
            let Some(timestamp) = queries::alias_timestamp(&alias) else {
                continue;
            };
            let rows: Vec<BlockRow> = serde_json::from_value(rows)?;
            if let Some(first) = rows.into_iter().next() {
                out.push(BlockRef::new(timestamp, first.number));
            }
        }
        out.sort_by_key(|b| b.timestamp);
        Ok(out)
    }
}

#[async_trait]
impl EthPriceProvider for GraphConnector {
    async fn eth_price(&self, _policy: FetchPolicy) -> Result<Decimal, DexError> {
        let mut data = self.exchange(&queries::eth_price(), "eth price").await?;
        let bundle: Option<Bundle> = take(&mut data, "bundle")?;
        bundle
            .map(|b| b.eth_price)
            .ok_or_else(|| DexError::not_found("eth price bundle"))
    }
}

impl SubgraphConnector for GraphConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn vendor(&self) -> &'static str {
        "The Graph"
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
