use std::time::Duration;

use dexsight::{CacheConfig, Capability, Dexsight};
use dexsight_subgraph::{GraphConnector, SubgraphEndpoints};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point the connector at your own deployments:
    //   DEXSIGHT_EXCHANGE_URL=... DEXSIGHT_BLOCKS_URL=... cargo run --example 05_custom_endpoints
    let (Ok(exchange), Ok(blocks)) = (
        std::env::var("DEXSIGHT_EXCHANGE_URL"),
        std::env::var("DEXSIGHT_BLOCKS_URL"),
    ) else {
        println!("set DEXSIGHT_EXCHANGE_URL and DEXSIGHT_BLOCKS_URL to run this example");
        return Ok(());
    };

    // ETH price changes often; pair metadata and blocks much less.
    let mut cache = CacheConfig::default();
    cache.per_capability_ttl_ms.insert(Capability::EthPrice.as_str().to_string(), 10_000);
    cache.per_capability_ttl_ms.insert(Capability::Blocks.as_str().to_string(), 600_000);

    let connector = GraphConnector::builder()
        .endpoints(SubgraphEndpoints::parse(&exchange, &blocks)?)
        .chunk_size(50)
        .cached(&cache)?;
    println!("{:#?}", connector.describe());

    let dex = Dexsight::builder()
        .with_connector(connector.build()?)
        .provider_timeout(Duration::from_secs(20))
        .request_timeout(Duration::from_secs(60))
        .build()?;

    let ids = dex.top_pair_ids().await?;
    let price = dex.eth_price().await?;
    let rows = dex.bulk_pair_data(&ids[..ids.len().min(10)], price).await?;
    for row in rows {
        println!("{} {}", row.pair.id, row.tracked_reserve_usd.round_dp(0));
    }

    Ok(())
}
