//! GraphQL documents for the exchange and blocks subgraphs.
//!
//! Static documents take their inputs as variables. Documents pinned to a block
//! or built from aliases are rendered as text; every interpolated value is an
//! integer or a validated `Address`.

use std::fmt::Write as _;

use dexsight_core::{Address, BlockRef};
use serde_json::json;

use crate::transport::GraphqlRequest;

/// Number of pairs ranked by `top_pairs`.
pub const TOP_PAIRS_LIMIT: usize = 200;
/// Largest `first:` the subgraph accepts; id lists are chunked to this size.
pub const MAX_PAGE: usize = 1_000;
/// Width of the window searched for a block after a timestamp, in seconds.
pub const BLOCK_WINDOW_SECONDS: i64 = 600;
/// Mints and burns returned by the transactions documents.
pub const MINTS_BURNS_LIMIT: usize = 20;
/// Swaps returned by the transactions documents.
pub const SWAPS_LIMIT: usize = 30;

const PAIR_FIELDS: &str = r"
fragment PairFields on Pair {
  id
  txCount
  token0 { id symbol name totalLiquidity derivedETH }
  token1 { id symbol name totalLiquidity derivedETH }
  reserve0
  reserve1
  reserveUSD
  reserveETH
  trackedReserveETH
  totalSupply
  volumeUSD
  untrackedVolumeUSD
  token0Price
  token1Price
  createdAtTimestamp
  createdAtBlockNumber
}";

const SNAPSHOT_FIELDS: &str = "id reserveUSD trackedReserveETH volumeUSD untrackedVolumeUSD";

const EVENT_PAIR: &str = "pair { token0 { id symbol } token1 { id symbol } }";

// Without `first:` the subgraph answers with 100 rows.
fn page_size(ids: &[Address]) -> usize {
    ids.len().clamp(1, MAX_PAGE)
}

fn id_list(ids: &[Address]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| format!("\"{id}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Ids of the top pairs by tracked reserve.
#[must_use]
pub fn top_pairs() -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query pairs {{
  pairs(first: {TOP_PAIRS_LIMIT}, orderBy: trackedReserveETH, orderDirection: desc) {{
    id
  }}
}}"
    ))
}

/// Current state of the listed pairs. At most [`MAX_PAGE`] ids per request.
#[must_use]
pub fn pairs_bulk(ids: &[Address]) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query pairs($allPairs: [Bytes]!) {{
  pairs(first: {}, where: {{ id_in: $allPairs }}, orderBy: trackedReserveETH, orderDirection: desc) {{
    ...PairFields
  }}
}}
{PAIR_FIELDS}",
        page_size(ids)
    ))
    .with_variables(json!({ "allPairs": ids }))
}

/// Historical subset of the listed pairs at `block`. At most [`MAX_PAGE`] ids per request.
#[must_use]
pub fn pairs_historical_bulk(ids: &[Address], block: u64) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query pairs {{
  pairs(first: {}, where: {{ id_in: {} }}, block: {{ number: {block} }}, orderBy: trackedReserveETH, orderDirection: desc) {{
    {SNAPSHOT_FIELDS}
  }}
}}",
        page_size(ids),
        id_list(ids)
    ))
}

/// Full record of one pair at `block`.
#[must_use]
pub fn pair_at_block(id: &Address, block: u64) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query pairs {{
  pairs(block: {{ number: {block} }}, where: {{ id: \"{id}\" }}) {{
    ...PairFields
  }}
}}
{PAIR_FIELDS}"
    ))
}

/// One page of daily snapshots, oldest first.
#[must_use]
pub fn pair_chart(pair: &Address, skip: usize, first: usize) -> GraphqlRequest {
    GraphqlRequest::new(
        "query pairDayDatas($pairAddress: Bytes!, $skip: Int!, $first: Int!) {
  pairDayDatas(first: $first, skip: $skip, orderBy: date, orderDirection: asc, where: { pairAddress: $pairAddress }) {
    id
    date
    dailyVolumeToken0
    dailyVolumeToken1
    dailyVolumeUSD
    reserveUSD
  }
}",
    )
    .with_variables(json!({ "pairAddress": pair, "skip": skip, "first": first }))
}

fn transactions_body(filter: &str) -> String {
    format!(
        "  mints(first: {MINTS_BURNS_LIMIT}, {filter}orderBy: timestamp, orderDirection: desc) {{
    transaction {{ id timestamp }}
    {EVENT_PAIR}
    to
    liquidity
    amount0
    amount1
    amountUSD
  }}
  burns(first: {MINTS_BURNS_LIMIT}, {filter}orderBy: timestamp, orderDirection: desc) {{
    transaction {{ id timestamp }}
    {EVENT_PAIR}
    sender
    liquidity
    amount0
    amount1
    amountUSD
  }}
  swaps(first: {SWAPS_LIMIT}, {filter}orderBy: timestamp, orderDirection: desc) {{
    id
    transaction {{ id timestamp }}
    {EVENT_PAIR}
    amount0In
    amount0Out
    amount1In
    amount1Out
    amountUSD
    to
  }}"
    )
}

/// Latest mints, burns and swaps across every pair.
#[must_use]
pub fn all_transactions() -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query transactions {{\n{}\n}}",
        transactions_body("")
    ))
}

/// Latest mints, burns and swaps of the listed pairs.
#[must_use]
pub fn filtered_transactions(pairs: &[Address]) -> GraphqlRequest {
    GraphqlRequest::new(format!(
        "query transactions($allPairs: [Bytes]!) {{\n{}\n}}",
        transactions_body("where: { pair_in: $allPairs }, ")
    ))
    .with_variables(json!({ "allPairs": pairs }))
}

/// Both token prices of `pair` at each block, aliased `t{timestamp}`.
#[must_use]
pub fn hourly_pair_rates(pair: &Address, blocks: &[BlockRef]) -> GraphqlRequest {
    let mut q = String::from("query blocks {\n");
    for b in blocks {
        let _ = writeln!(
            q,
            "  t{}: pair(id: \"{pair}\", block: {{ number: {} }}) {{ token0Price token1Price }}",
            b.timestamp, b.number
        );
    }
    q.push('}');
    GraphqlRequest::new(q)
}

/// First block after each timestamp, aliased `t{timestamp}`.
#[must_use]
pub fn blocks(timestamps: &[i64]) -> GraphqlRequest {
    let mut q = String::from("query blocks {\n");
    for t in timestamps {
        let _ = writeln!(
            q,
            "  t{t}: blocks(first: 1, orderBy: timestamp, orderDirection: desc, where: {{ timestamp_gt: {t}, timestamp_lt: {} }}) {{ number }}",
            t + BLOCK_WINDOW_SECONDS
        );
    }
    q.push('}');
    GraphqlRequest::new(q)
}

/// The exchange-wide ETH price.
#[must_use]
pub fn eth_price() -> GraphqlRequest {
    GraphqlRequest::new(
        "query bundles {
  bundle(id: \"1\") {
    ethPrice
  }
}",
    )
}

/// Timestamp encoded in a `t{timestamp}` alias.
#[must_use]
pub fn alias_timestamp(alias: &str) -> Option<i64> {
    alias.strip_prefix('t')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(s: &'static str) -> Address {
        Address::from_static(s)
    }

    #[test]
    fn block_aliases_cover_ten_minute_window() {
        let q = blocks(&[100, 4_000]).query;
        assert!(q.contains("t100: blocks(first: 1"));
        assert!(q.contains("timestamp_gt: 100, timestamp_lt: 700"));
        assert!(q.contains("t4000: blocks"));
        assert!(q.contains("orderDirection: desc"));
    }

    #[test]
    fn historical_bulk_pins_block_and_ids() {
        let q = pairs_historical_bulk(
            &[
                a("0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc"),
                a("0xbb2b8038a1640196fbe3e38816f3e67cba72d940"),
            ],
            18_000_000,
        )
        .query;
        assert!(q.contains("block: { number: 18000000 }"));
        assert!(q.contains(
            "id_in: [\"0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc\", \"0xbb2b8038a1640196fbe3e38816f3e67cba72d940\"]"
        ));
        assert!(q.contains("pairs(first: 2,"));
    }

    #[test]
    fn bulk_documents_request_every_listed_pair() {
        let ids: Vec<Address> = (0..TOP_PAIRS_LIMIT)
            .map(|i| Address::new(&format!("0x{i:040x}")).unwrap())
            .collect();
        assert!(pairs_bulk(&ids).query.contains("pairs(first: 200,"));
        assert!(pairs_historical_bulk(&ids, 1).query.contains("pairs(first: 200,"));

        let many: Vec<Address> = (0..1_500)
            .map(|i| Address::new(&format!("0x{i:040x}")).unwrap())
            .collect();
        assert!(pairs_bulk(&many).query.contains("pairs(first: 1000,"));
    }

    #[test]
    fn rates_alias_each_block_by_timestamp() {
        let pair = a("0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc");
        let q = hourly_pair_rates(&pair, &[BlockRef::new(3_600, 10), BlockRef::new(7_200, 20)]).query;
        assert!(q.contains("t3600: pair(id: \"0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc\", block: { number: 10 })"));
        assert!(q.contains("t7200: pair("));
    }

    #[test]
    fn chart_and_bulk_pass_variables() {
        let pair = a("0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc");
        let req = pair_chart(&pair, 2_000, 1_000);
        assert_eq!(req.variables["skip"], 2_000);
        assert_eq!(req.variables["first"], 1_000);
        assert_eq!(req.variables["pairAddress"], pair.as_str());

        let req = pairs_bulk(std::slice::from_ref(&pair));
        assert_eq!(req.variables["allPairs"][0], pair.as_str());
        assert!(req.query.contains("fragment PairFields on Pair"));
    }

    #[test]
    fn filtered_transactions_restrict_every_list() {
        let q = filtered_transactions(&[]).query;
        assert_eq!(q.matches("pair_in: $allPairs").count(), 3);
        assert!(!all_transactions().query.contains("pair_in"));
    }

    #[test]
    fn alias_timestamp_parses_prefix() {
        assert_eq!(alias_timestamp("t1700000000"), Some(1_700_000_000));
        assert_eq!(alias_timestamp("pairs"), None);
        assert_eq!(alias_timestamp("t"), None);
    }
}
