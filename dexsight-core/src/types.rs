//! Re-exports of the shared DTOs so downstream crates can depend on `dexsight-core` alone.

pub use dexsight_types::de;
pub use dexsight_types::{Address, Capability, DexError, TokenLabel};
pub use dexsight_types::{BlockRef, HourlyRates, RateCandle, RateSample};
pub use dexsight_types::{Burn, Mint, PairTokens, Swap, TokenRef, TransactionRef, Transactions};
pub use dexsight_types::{CacheConfig, DexsightConfig, FetchPolicy};
pub use dexsight_types::{DAY_SECONDS, PairDayData};
pub use dexsight_types::{Decimal, EnrichedPair, Pair, PairSnapshot, Token};
pub use dexsight_types::{MiddlewareLayer, MiddlewareStack};
