//! Wire layer: posting GraphQL documents and unwrapping the response envelope.

use std::sync::Arc;

use async_trait::async_trait;
use dexsight_core::DexError;
use graphql_client::Response;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::CONNECTOR_NAME;

/// A GraphQL request body.
///
/// Documents are built at runtime (block-pinned and aliased queries), so the
/// query text is owned rather than a `&'static str`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variables: Value,
}

impl GraphqlRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Value::Null,
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }
}

/// Sends a request to a subgraph endpoint and returns its `data` object.
///
/// Implementations are swappable so tests can answer requests in memory.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    async fn query(&self, endpoint: &Url, request: &GraphqlRequest) -> Result<Value, DexError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn transport_error(e: &reqwest::Error) -> DexError {
    DexError::connector(CONNECTOR_NAME, e.to_string())
}

/// Unwrap a GraphQL envelope.
///
/// Errors reported alongside usable data are logged and ignored; errors
/// without data become `DexError::Graphql`.
pub(crate) fn into_data(body: Response<Value>) -> Result<Value, DexError> {
    let messages: Vec<String> = body
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .collect();
    match body.data {
        Some(data) if !data.is_null() => {
            #[cfg(feature = "tracing")]
            if !messages.is_empty() {
                tracing::warn!(errors = ?messages, "partial graphql response");
            }
            Ok(data)
        }
        _ if messages.is_empty() => Err(DexError::Data("response carried no data".into())),
        _ => Err(DexError::graphql(messages)),
    }
}

#[async_trait]
impl GraphTransport for HttpTransport {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dexsight_subgraph::transport::query",
            skip(self, request),
            fields(endpoint = %endpoint),
            err
        )
    )]
    async fn query(&self, endpoint: &Url, request: &GraphqlRequest) -> Result<Value, DexError> {
        let resp = self
            .http
            .post(endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DexError::connector(
                CONNECTOR_NAME,
                format!("server error {status}"),
            ));
        }

        let body: Response<Value> = resp.json().await.map_err(|e| transport_error(&e))?;
        into_data(body)
    }
}

impl dyn GraphTransport {
    /// Build a transport from a closure over `(endpoint, request)`.
    pub fn from_fn<F>(f: F) -> Arc<dyn GraphTransport>
    where
        F: Send + Sync + 'static + Fn(&Url, &GraphqlRequest) -> Result<Value, DexError>,
    {
        struct FnTransport<F>(F);

        #[async_trait]
        impl<F> GraphTransport for FnTransport<F>
        where
            F: Send + Sync + 'static + Fn(&Url, &GraphqlRequest) -> Result<Value, DexError>,
        {
            async fn query(
                &self,
                endpoint: &Url,
                request: &GraphqlRequest,
            ) -> Result<Value, DexError> {
                (self.0)(endpoint, request)
            }
        }

        Arc::new(FnTransport(f))
    }
}
