//! dexsight-core
//!
//! Connector traits, pair enrichment and pure time-series helpers shared by
//! the dexsight crates.
//!
//! - `connector`: the `SubgraphConnector` trait and its role traits.
//! - `middleware`: the trait implemented by connector wrappers.
//! - `enrich`: derived volume/liquidity metrics for a pair.
//! - `timeseries`: percent changes, daily gap filling, hourly candles.

pub mod clock;
/// Connector role traits and the primary `SubgraphConnector` interface.
pub mod connector;
pub mod enrich;
pub mod middleware;
pub mod timeseries;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use connector::SubgraphConnector;
pub use enrich::{History, enrich_pair};
pub use middleware::Middleware;
pub use timeseries::candles::rate_candles;
pub use timeseries::change::{TwoDayChange, percent_change, two_day_change};
pub use timeseries::fill::fill_daily_gaps;
pub use timeseries::window::{ChangeTimestamps, hourly_timestamps, start_of_minute};
pub use types::*;
