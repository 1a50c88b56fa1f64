use dexsight_core::DexError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Hosted SushiSwap exchange subgraph.
pub const SUSHISWAP_EXCHANGE: &str = "https://api.thegraph.com/subgraphs/name/sushiswap/exchange";
/// Hosted Ethereum blocks subgraph.
pub const ETHEREUM_BLOCKS: &str =
    "https://api.thegraph.com/subgraphs/name/blocklytics/ethereum-blocks";

/// The two subgraphs a `GraphConnector` talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphEndpoints {
    /// Exchange subgraph (pairs, day data, events, ETH price).
    pub exchange: Url,
    /// Blocks subgraph (timestamp to block height).
    pub blocks: Url,
}

impl SubgraphEndpoints {
    /// Parse both endpoints.
    ///
    /// # Errors
    /// Returns `DexError::InvalidArg` if either string is not an absolute URL.
    pub fn parse(exchange: &str, blocks: &str) -> Result<Self, DexError> {
        let parse = |s: &str| {
            Url::parse(s).map_err(|e| DexError::InvalidArg(format!("invalid endpoint {s}: {e}")))
        };
        Ok(Self {
            exchange: parse(exchange)?,
            blocks: parse(blocks)?,
        })
    }

    /// The hosted SushiSwap exchange and Ethereum blocks subgraphs.
    ///
    /// # Errors
    /// Never fails for the built-in URLs; the `Result` mirrors [`Self::parse`].
    pub fn sushiswap() -> Result<Self, DexError> {
        Self::parse(SUSHISWAP_EXCHANGE, ETHEREUM_BLOCKS)
    }
}
