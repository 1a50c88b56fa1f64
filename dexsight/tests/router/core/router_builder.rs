use std::sync::Arc;
use std::time::Duration;

use dexsight::{Dexsight, DexError, DexsightConfig};
use dexsight_mock::MockConnector;

#[test]
fn build_without_connectors_fails() {
    let err = Dexsight::builder().build().err().unwrap();
    assert!(matches!(err, DexError::InvalidArg(_)));
}

#[test]
fn zero_sizes_are_rejected() {
    let mock = Arc::new(MockConnector::new());

    let page = Dexsight::builder()
        .with_connector(mock.clone())
        .chart_page_size(0)
        .build();
    assert!(matches!(page, Err(DexError::InvalidArg(_))));

    let batch = Dexsight::builder()
        .with_connector(mock.clone())
        .block_batch_size(0)
        .build();
    assert!(matches!(batch, Err(DexError::InvalidArg(_))));

    let interval = Dexsight::builder()
        .with_connector(mock)
        .rate_interval(Duration::from_millis(500))
        .build();
    assert!(matches!(interval, Err(DexError::InvalidArg(_))));
}

#[test]
fn setters_land_in_config() {
    let dex = Dexsight::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .provider_timeout(Duration::from_secs(3))
        .request_timeout(Duration::from_secs(9))
        .chart_page_size(250)
        .token_label(None)
        .build()
        .unwrap();

    let cfg = dex.config();
    assert_eq!(cfg.provider_timeout, Duration::from_secs(3));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(9)));
    assert_eq!(cfg.chart_page_size, 250);
    assert_eq!(cfg.token_label, None);
    assert_eq!(cfg.block_batch_size, DexsightConfig::default().block_batch_size);
}
