//! Dexsight builds pair analytics for a Uniswap-v2 style exchange out of its
//! subgraphs.
//!
//! Overview
//! - Routes each request to the first registered connector that advertises the
//!   needed capability (top pairs, pair state, history, charts, blocks, ...).
//! - Merges current pair state with snapshots one day, two days and one week
//!   old and derives volume, liquidity and tracked-reserve metrics.
//! - Pages daily chart data and pads missing days; turns hourly price samples
//!   into open/close candles.
//! - Bounds every connector call with a timeout and fan-out stages with an
//!   optional request deadline.
//!
//! Key behaviors
//! - Any failing lookup fails the whole page-level call; there is no partial
//!   table.
//! - "Nothing to sample" (no timestamps, no blocks) is an empty result, not an
//!   error.
//! - Transaction listings always bypass the response cache; everything else
//!   reads through it.
//!
//! Building an orchestrator over the hosted subgraphs with a response cache:
//! ```rust,ignore
//! use std::time::Duration;
//! use dexsight::{CacheConfig, Dexsight};
//! use dexsight_subgraph::GraphConnector;
//!
//! let subgraph = GraphConnector::builder()
//!     .cached(&CacheConfig::default())?
//!     .build()?;
//! let dex = Dexsight::builder()
//!     .with_connector(subgraph)
//!     .provider_timeout(Duration::from_secs(15))
//!     .build()?;
//!
//! let table = dex.all_pair_data().await?;
//! for (id, pair) in &table {
//!     println!("{id} {} 24h ${}", pair.pair.token0.symbol, pair.one_day_volume_usd);
//! }
//! ```
//!
//! Chart and hourly rates for a single pair:
//! ```rust,ignore
//! let chart = dex.pair_chart_data(&pair).await?;
//! let week_ago = chrono::Utc::now().timestamp() - 7 * 86_400;
//! let rates = dex.hourly_rate_data(&pair, week_ago, None).await?;
//! ```
//!
//! See `dexsight/examples/` for runnable demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Dexsight, DexsightBuilder};
pub use router::util::join_with_deadline;

pub use dexsight_middleware::{CacheMiddleware, ConnectorBuilder};

// Re-export core types for convenience
pub use dexsight_core::{
    Address, BlockRef, Burn, CacheConfig, Capability, Clock, DexError, DexsightConfig,
    EnrichedPair, FetchPolicy, HourlyRates, Mint, Pair, PairDayData, PairSnapshot, RateCandle,
    RateSample, SubgraphConnector, Swap, SystemClock, Token, TokenLabel, Transactions,
};

pub use dexsight_core::{DAY_SECONDS, Decimal};
