use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dexsight::{CacheConfig, Dexsight, DexsightBuilder, SubgraphConnector};
use dexsight_subgraph::GraphConnector;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (default `dexsight=info`).
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dexsight=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// True when `DEXSIGHT_EXAMPLES_USE_MOCK` is set.
pub fn use_mock() -> bool {
    std::env::var("DEXSIGHT_EXAMPLES_USE_MOCK").is_ok()
}

#[must_use]
pub fn get_connector() -> Arc<dyn SubgraphConnector> {
    if use_mock() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(dexsight_mock::MockConnector::new())
    } else {
        GraphConnector::builder()
            .cached(&CacheConfig::default())
            .and_then(dexsight::ConnectorBuilder::build)
            .expect("hosted subgraph connector")
    }
}

/// Builder over [`get_connector`]; the mock's fixtures are pinned to `MOCK_NOW`.
#[must_use]
pub fn builder() -> DexsightBuilder {
    let b = Dexsight::builder().with_connector(get_connector());
    if use_mock() {
        b.clock(|| {
            Utc.timestamp_opt(dexsight_mock::MOCK_NOW, 0)
                .single()
                .unwrap_or_else(Utc::now)
        })
    } else {
        b
    }
}
