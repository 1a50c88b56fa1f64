//! Block references and hourly price samples.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A block resolved for a wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockRef {
    /// Requested unix timestamp (not the block's own timestamp).
    pub timestamp: i64,
    /// Block height.
    pub number: u64,
}

impl BlockRef {
    #[must_use]
    pub const fn new(timestamp: i64, number: u64) -> Self {
        Self { timestamp, number }
    }
}

/// Both price ratios of a pair observed at one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSample {
    pub timestamp: i64,
    pub token0_price: Decimal,
    pub token1_price: Decimal,
}

/// Open/close of one price ratio over the bucket starting at `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCandle {
    pub timestamp: i64,
    pub open: Decimal,
    pub close: Decimal,
}

/// Hourly candles for both price ratios of a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRates {
    /// Candles of `token0Price`.
    pub token0: Vec<RateCandle>,
    /// Candles of `token1Price`.
    pub token1: Vec<RateCandle>,
}

impl HourlyRates {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token0.is_empty() && self.token1.is_empty()
    }
}
