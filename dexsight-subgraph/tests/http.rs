use dexsight_core::connector::{EthPriceProvider, TopPairsProvider};
use dexsight_core::{DexError, FetchPolicy};
use dexsight_subgraph::{GraphConnector, SubgraphEndpoints};
use httpmock::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

fn connector(server: &MockServer) -> GraphConnector {
    GraphConnector::builder()
        .endpoints(
            SubgraphEndpoints::parse(&server.url("/exchange"), &server.url("/blocks")).unwrap(),
        )
        .http_client(reqwest::Client::new())
        .build()
        .unwrap()
}

#[tokio::test]
async fn posts_query_and_decodes_data() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/exchange")
                .header("content-type", "application/json");
            then.status(200)
                .json_body(json!({ "data": { "bundle": { "ethPrice": "1850.25" } } }));
        })
        .await;

    let price = connector(&server)
        .eth_price(FetchPolicy::CacheFirst)
        .await
        .unwrap();
    m.assert_async().await;
    assert_eq!(price, Decimal::new(185_025, 2));
}

#[tokio::test]
async fn graphql_errors_surface_as_graphql() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/exchange");
            then.status(200)
                .json_body(json!({ "data": null, "errors": [{ "message": "store error" }] }));
        })
        .await;

    let err = connector(&server)
        .top_pairs(FetchPolicy::CacheFirst)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DexError::Graphql {
            messages: vec!["store error".into()]
        }
    );
}

#[tokio::test]
async fn server_errors_are_connector_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/exchange");
            then.status(502).body("bad gateway");
        })
        .await;

    let err = connector(&server)
        .top_pairs(FetchPolicy::CacheFirst)
        .await
        .unwrap_err();
    assert!(matches!(err, DexError::Connector { .. }));
}
