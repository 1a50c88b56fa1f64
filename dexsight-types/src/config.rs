//! Configuration types shared across the orchestrator, middleware and connectors.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Read policy passed with every connector call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchPolicy {
    /// Serve from the response cache when present; otherwise fetch and store.
    #[default]
    CacheFirst,
    /// Always hit the endpoint and leave the cache untouched.
    NoCache,
}

impl FetchPolicy {
    /// Whether a cached response may satisfy this call.
    #[must_use]
    pub const fn reads_cache(self) -> bool {
        matches!(self, Self::CacheFirst)
    }
}

/// Response cache sizing and expiry, keyed by capability label.
///
/// A TTL of `0` disables caching for that capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied when a capability has no override.
    pub default_ttl_ms: u64,
    /// Capacity applied when a capability has no override.
    pub default_max_entries: u64,
    /// Per-capability TTL overrides (`Capability::as_str` labels).
    pub per_capability_ttl_ms: HashMap<String, u64>,
    /// Per-capability capacity overrides (`Capability::as_str` labels).
    pub per_capability_max_entries: HashMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: 60_000,
            default_max_entries: 1_024,
            per_capability_ttl_ms: HashMap::new(),
            per_capability_max_entries: HashMap::new(),
        }
    }
}

impl CacheConfig {
    /// Effective TTL for a capability label.
    #[must_use]
    pub fn ttl_for(&self, capability: &str) -> Duration {
        Duration::from_millis(
            self.per_capability_ttl_ms
                .get(capability)
                .copied()
                .unwrap_or(self.default_ttl_ms),
        )
    }

    /// Effective capacity for a capability label.
    #[must_use]
    pub fn max_entries_for(&self, capability: &str) -> u64 {
        self.per_capability_max_entries
            .get(capability)
            .copied()
            .unwrap_or(self.default_max_entries)
    }
}

/// Display override applied to one token during pair enrichment.
///
/// The exchange indexes the wrapped native asset under its ERC-20 name; dashboards
/// show it as the native coin instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenLabel {
    /// Token address the override applies to.
    pub id: Address,
    /// Replacement display name.
    pub name: String,
    /// Replacement ticker symbol.
    pub symbol: String,
}

impl TokenLabel {
    /// Mainnet WETH shown as "Ether (Wrapped)" / "ETH".
    #[must_use]
    pub fn wrapped_ether() -> Self {
        Self {
            id: Address::from_static("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            name: "Ether (Wrapped)".to_string(),
            symbol: "ETH".to_string(),
        }
    }
}

/// Global configuration for the `Dexsight` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexsightConfig {
    /// Timeout for individual connector calls.
    pub provider_timeout: Duration,
    /// Optional overall deadline for fan-out aggregations (bulk enrichment, fallbacks).
    pub request_timeout: Option<Duration>,
    /// Rows requested per chart page; paging stops on the first short page.
    pub chart_page_size: usize,
    /// Spacing between hourly rate samples.
    pub rate_interval: Duration,
    /// Timestamps resolved per block query when building hourly rates.
    pub block_batch_size: usize,
    /// Token relabelled during enrichment; `None` leaves names untouched.
    pub token_label: Option<TokenLabel>,
}

impl Default for DexsightConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            chart_page_size: 1_000,
            rate_interval: Duration::from_secs(3_600),
            block_batch_size: 100,
            token_label: Some(TokenLabel::wrapped_ether()),
        }
    }
}
