//! Data transfer objects, errors and configuration shared by the dexsight crates.

mod address;
mod blocks;
mod capability;
mod chart;
mod config;
pub mod de;
mod error;
mod middleware;
mod pair;
mod transactions;

pub use address::Address;
pub use blocks::{BlockRef, HourlyRates, RateCandle, RateSample};
pub use capability::Capability;
pub use chart::{DAY_SECONDS, PairDayData};
pub use config::{CacheConfig, DexsightConfig, FetchPolicy, TokenLabel};
pub use error::DexError;
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use pair::{EnrichedPair, Pair, PairSnapshot, Token};
pub use transactions::{Burn, Mint, PairTokens, Swap, TokenRef, TransactionRef, Transactions};

pub use rust_decimal::Decimal;
