use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with connector role traits and allow consistent
/// Display formatting and match-exhaustive handling when adding
/// new query families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Identifiers of the top pairs by tracked reserve.
    TopPairs,
    /// Current state for a list of pairs.
    Pairs,
    /// Historical state for a list of pairs at one block.
    HistoricalPairs,
    /// Historical state for a single pair at one block.
    PairAtBlock,
    /// One page of daily snapshots for a pair.
    PairChart,
    /// Recent mints, burns and swaps.
    Transactions,
    /// Token prices for a pair sampled at a list of blocks.
    HourlyRates,
    /// Block numbers resolved from timestamps.
    Blocks,
    /// Reference ETH price in US dollars.
    EthPrice,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopPairs => "top-pairs",
            Self::Pairs => "pairs",
            Self::HistoricalPairs => "historical-pairs",
            Self::PairAtBlock => "pair-at-block",
            Self::PairChart => "pair-chart",
            Self::Transactions => "transactions",
            Self::HourlyRates => "hourly-rates",
            Self::Blocks => "blocks",
            Self::EthPrice => "eth-price",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
