// Shared fixtures for the router tests.
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use dexsight::{
    Address, Decimal, Dexsight, DexsightBuilder, Pair, PairSnapshot, SubgraphConnector, Token,
};
use dexsight_mock::{MOCK_NOW, MockConnector};

pub const USDC_WETH: &str = "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc";
pub const WBTC_WETH: &str = "0xbb2b8038a1640196fbe3e38816f3e67cba72d940";
pub const PEPE_WETH: &str = "0xa43fe16908251ee70ef74718545e4fe6c5ccec9f";

/// `MOCK_NOW` as a `DateTime`, the instant every fixture is anchored to.
pub fn mock_now() -> DateTime<Utc> {
    Utc.timestamp_opt(MOCK_NOW, 0).single().unwrap()
}

/// Builder with a pinned clock and no connectors.
pub fn pinned() -> DexsightBuilder {
    Dexsight::builder().clock(mock_now)
}

/// Orchestrator over the static fixture connector.
pub fn fixture_dex() -> Dexsight {
    pinned()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

/// Orchestrator over a single (possibly layered) connector.
pub fn dex_over(c: Arc<dyn SubgraphConnector>) -> Dexsight {
    pinned().with_connector(c).build().unwrap()
}

pub fn addr(s: &'static str) -> Address {
    Address::from_static(s)
}

fn token(id: &'static str, symbol: &str) -> Token {
    Token {
        id: Address::from_static(id),
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        total_liquidity: None,
        derived_eth: None,
    }
}

/// Minimal pair record with the given cumulative volume and reserve.
pub fn pair(id: &'static str, volume_usd: i64, reserve_usd: i64) -> Pair {
    Pair {
        id: Address::from_static(id),
        token0: token("0x0000000000000000000000000000000000000a0a", "AAA"),
        token1: token(dexsight_mock::WETH, "WETH"),
        reserve0: Decimal::ONE,
        reserve1: Decimal::ONE,
        reserve_usd: Decimal::from(reserve_usd),
        reserve_eth: Decimal::ONE,
        tracked_reserve_eth: Decimal::TEN,
        total_supply: Decimal::ONE,
        volume_usd: Decimal::from(volume_usd),
        untracked_volume_usd: Decimal::from(volume_usd),
        token0_price: Some(Decimal::ONE),
        token1_price: Some(Decimal::ONE),
        tx_count: 1,
        created_at_timestamp: 0,
        created_at_block_number: 0,
    }
}

pub fn snapshot(id: &'static str, volume_usd: i64, reserve_usd: i64) -> PairSnapshot {
    PairSnapshot::from(pair(id, volume_usd, reserve_usd))
}

/// Blocks at the one-day, two-day and one-week lookback timestamps from `MOCK_NOW`,
/// numbered 1001, 1002 and 1007.
pub fn lookback_blocks() -> [dexsight::BlockRef; 3] {
    let ts = dexsight_core::ChangeTimestamps::at(mock_now());
    [
        dexsight::BlockRef::new(ts.one_day, 1_001),
        dexsight::BlockRef::new(ts.two_day, 1_002),
        dexsight::BlockRef::new(ts.one_week, 1_007),
    ]
}
