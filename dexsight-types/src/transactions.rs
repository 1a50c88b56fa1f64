//! Mint, burn and swap events.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Transaction id and time shared by every event kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRef {
    pub id: String,
    #[serde(with = "crate::de::num_str")]
    pub timestamp: i64,
}

/// Token id and symbol, as nested inside an event's pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRef {
    pub id: Address,
    pub symbol: String,
}

/// Both tokens of the pair an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairTokens {
    pub token0: TokenRef,
    pub token1: TokenRef,
}

/// Liquidity added to a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mint {
    pub transaction: TransactionRef,
    pub pair: PairTokens,
    pub to: Address,
    #[serde(default)]
    pub liquidity: Decimal,
    #[serde(default)]
    pub amount0: Option<Decimal>,
    #[serde(default)]
    pub amount1: Option<Decimal>,
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Option<Decimal>,
}

/// Liquidity removed from a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burn {
    pub transaction: TransactionRef,
    pub pair: PairTokens,
    #[serde(default)]
    pub sender: Option<Address>,
    #[serde(default)]
    pub liquidity: Decimal,
    #[serde(default)]
    pub amount0: Option<Decimal>,
    #[serde(default)]
    pub amount1: Option<Decimal>,
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Option<Decimal>,
}

/// A trade against a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub id: String,
    pub transaction: TransactionRef,
    pub pair: PairTokens,
    #[serde(rename = "amount0In", default)]
    pub amount0_in: Decimal,
    #[serde(rename = "amount0Out", default)]
    pub amount0_out: Decimal,
    #[serde(rename = "amount1In", default)]
    pub amount1_in: Decimal,
    #[serde(rename = "amount1Out", default)]
    pub amount1_out: Decimal,
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Decimal,
    pub to: Address,
}

/// Latest events, newest first within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transactions {
    #[serde(default)]
    pub mints: Vec<Mint>,
    #[serde(default)]
    pub burns: Vec<Burn>,
    #[serde(default)]
    pub swaps: Vec<Swap>,
}

impl Transactions {
    /// Total number of events across the three lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mints.len() + self.burns.len() + self.swaps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
