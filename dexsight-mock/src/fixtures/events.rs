use dexsight_core::{
    Address, Burn, Decimal, Mint, Pair, PairTokens, Swap, TokenRef, TransactionRef, Transactions,
};

use super::pairs;

const TRADER: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";

fn tokens(p: &Pair) -> PairTokens {
    PairTokens {
        token0: TokenRef {
            id: p.token0.id.clone(),
            symbol: p.token0.symbol.clone(),
        },
        token1: TokenRef {
            id: p.token1.id.clone(),
            symbol: p.token1.symbol.clone(),
        },
    }
}

fn tx(p: &Pair, n: i64) -> TransactionRef {
    TransactionRef {
        id: format!("{}-tx{n}", p.id.as_str()),
        timestamp: crate::MOCK_NOW - n * 60,
    }
}

/// One mint, one burn and two swaps for each known pair among `ids`.
pub fn for_pairs(ids: &[Address]) -> Transactions {
    let mut out = Transactions::default();
    for p in ids.iter().filter_map(pairs::current) {
        out.mints.push(Mint {
            transaction: tx(&p, 1),
            pair: tokens(&p),
            to: Address::from_static(TRADER),
            liquidity: Decimal::from(12),
            amount0: Some(Decimal::from(1_000)),
            amount1: Some(Decimal::ONE),
            amount_usd: Some(Decimal::from(2_000)),
        });
        out.burns.push(Burn {
            transaction: tx(&p, 2),
            pair: tokens(&p),
            sender: Some(Address::from_static(TRADER)),
            liquidity: Decimal::from(3),
            amount0: Some(Decimal::from(250)),
            amount1: Some(Decimal::new(25, 2)),
            amount_usd: Some(Decimal::from(500)),
        });
        for n in 3..5 {
            out.swaps.push(Swap {
                id: format!("{}-swap{n}", p.id.as_str()),
                transaction: tx(&p, n),
                pair: tokens(&p),
                amount0_in: Decimal::ZERO,
                amount0_out: Decimal::from(100 * n),
                amount1_in: Decimal::new(5 * n, 2),
                amount1_out: Decimal::ZERO,
                amount_usd: Decimal::from(100 * n),
                to: Address::from_static(TRADER),
            });
        }
    }
    out
}
