use dexsight_core::{Address, Decimal, Pair, PairSnapshot, Token};

use crate::{HEAD_BLOCK, WETH};

struct TokenSeed {
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
}

struct PairSeed {
    id: &'static str,
    token0: TokenSeed,
    token1: TokenSeed,
    reserve_usd: i64,
    tracked_reserve_eth: i64,
    volume_usd: i64,
    untracked_volume_usd: i64,
    price0_cents: i64,
    created_at_block: u64,
    created_at: i64,
    // Volume and reserve accrued per block, used to rewind state to older blocks
    volume_per_block: i64,
    reserve_per_block: i64,
}

const WETH_SEED: TokenSeed = TokenSeed {
    id: WETH,
    symbol: "WETH",
    name: "Wrapped Ether",
};

const SEEDS: &[PairSeed] = &[
    PairSeed {
        id: "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc",
        token0: TokenSeed {
            id: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            symbol: "USDC",
            name: "USD Coin",
        },
        token1: WETH_SEED,
        reserve_usd: 92_000_000,
        tracked_reserve_eth: 45_000,
        volume_usd: 160_000_000_000,
        untracked_volume_usd: 161_000_000_000,
        price0_cents: 204_500,
        created_at_block: 10_008_355,
        created_at: 1_588_710_145,
        volume_per_block: 4_000,
        reserve_per_block: 10,
    },
    PairSeed {
        id: "0xbb2b8038a1640196fbe3e38816f3e67cba72d940",
        token0: TokenSeed {
            id: "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599",
            symbol: "WBTC",
            name: "Wrapped BTC",
        },
        token1: WETH_SEED,
        reserve_usd: 71_000_000,
        tracked_reserve_eth: 35_000,
        volume_usd: 38_000_000_000,
        untracked_volume_usd: 38_500_000_000,
        price0_cents: 1_835,
        created_at_block: 10_091_097,
        created_at: 1_589_815_500,
        volume_per_block: 1_500,
        reserve_per_block: 5,
    },
    PairSeed {
        id: "0xa43fe16908251ee70ef74718545e4fe6c5ccec9f",
        token0: TokenSeed {
            id: "0x6982508145454ce325ddbe47a25d4ec3d2311933",
            symbol: "PEPE",
            name: "Pepe",
        },
        token1: WETH_SEED,
        reserve_usd: 2_400_000,
        tracked_reserve_eth: 1_200,
        volume_usd: 5_000_000,
        untracked_volume_usd: 5_000_000,
        price0_cents: 1,
        // Younger than one day relative to the head block
        created_at_block: HEAD_BLOCK - 3_000,
        created_at: crate::MOCK_NOW - 36_000,
        volume_per_block: 900,
        reserve_per_block: 0,
    },
];

fn token(seed: &TokenSeed) -> Token {
    Token {
        id: Address::from_static(seed.id),
        symbol: seed.symbol.to_string(),
        name: seed.name.to_string(),
        total_liquidity: None,
        derived_eth: None,
    }
}

fn rewind(value: i64, per_block: i64, block: u64) -> Decimal {
    let age = i64::try_from(HEAD_BLOCK.saturating_sub(block)).unwrap_or(i64::MAX);
    Decimal::from(value.saturating_sub(age.saturating_mul(per_block)).max(0))
}

fn pair_at(seed: &PairSeed, block: u64) -> Option<Pair> {
    if block < seed.created_at_block {
        return None;
    }
    let reserve_usd = rewind(seed.reserve_usd, seed.reserve_per_block, block);
    let price0 = Decimal::new(seed.price0_cents, 2);
    Some(Pair {
        id: Address::from_static(seed.id),
        token0: token(&seed.token0),
        token1: token(&seed.token1),
        reserve0: reserve_usd / Decimal::TWO,
        reserve1: Decimal::from(seed.tracked_reserve_eth) / Decimal::TWO,
        reserve_usd,
        reserve_eth: Decimal::from(seed.tracked_reserve_eth),
        tracked_reserve_eth: Decimal::from(seed.tracked_reserve_eth),
        total_supply: Decimal::from(1_000_000),
        volume_usd: rewind(seed.volume_usd, seed.volume_per_block, block),
        untracked_volume_usd: rewind(seed.untracked_volume_usd, seed.volume_per_block, block),
        token0_price: Some(price0),
        token1_price: Decimal::ONE.checked_div(price0),
        tx_count: (block - seed.created_at_block) / 10,
        created_at_timestamp: seed.created_at,
        created_at_block_number: seed.created_at_block,
    })
}

fn seed(id: &Address) -> Option<&'static PairSeed> {
    SEEDS.iter().find(|s| s.id == id.as_str())
}

/// Pair ids ordered by tracked reserve, highest first.
pub fn top_ids() -> Vec<Address> {
    let mut seeds: Vec<&PairSeed> = SEEDS.iter().collect();
    seeds.sort_by(|a, b| b.tracked_reserve_eth.cmp(&a.tracked_reserve_eth));
    seeds.into_iter().map(|s| Address::from_static(s.id)).collect()
}

pub fn current(id: &Address) -> Option<Pair> {
    seed(id).and_then(|s| pair_at(s, HEAD_BLOCK))
}

pub fn at_block(id: &Address, block: u64) -> Option<Pair> {
    seed(id).and_then(|s| pair_at(s, block))
}

pub fn snapshot_at_block(id: &Address, block: u64) -> Option<PairSnapshot> {
    at_block(id, block).map(PairSnapshot::from)
}

/// `(token0Price, token1Price)` drifting with the block number.
pub fn prices_at_block(id: &Address, block: u64) -> Option<(Decimal, Decimal)> {
    let p = at_block(id, block)?;
    let wobble = Decimal::new(i64::try_from(block % 100).unwrap_or(0), 4);
    Some((p.token0_price? + wobble, p.token1_price?))
}
