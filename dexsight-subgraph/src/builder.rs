use std::sync::Arc;

use dexsight_core::{CacheConfig, DexError, SubgraphConnector};
use dexsight_middleware::ConnectorBuilder;

use crate::config::SubgraphEndpoints;
use crate::split::DEFAULT_CHUNK;
use crate::transport::{GraphTransport, HttpTransport};
use crate::GraphConnector;

/// Fluent construction of a [`GraphConnector`].
///
/// Without explicit endpoints the hosted SushiSwap subgraphs are used; without
/// a transport, requests go through a default `reqwest::Client`.
pub struct GraphConnectorBuilder {
    endpoints: Option<SubgraphEndpoints>,
    transport: Option<Arc<dyn GraphTransport>>,
    chunk: usize,
}

impl Default for GraphConnectorBuilder {
    fn default() -> Self {
        Self {
            endpoints: None,
            transport: None,
            chunk: DEFAULT_CHUNK,
        }
    }
}

impl GraphConnectorBuilder {
    /// Subgraphs to query.
    #[must_use]
    pub fn endpoints(mut self, endpoints: SubgraphEndpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Send requests through an existing HTTP client.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.transport = Some(Arc::new(HttpTransport::new(http)));
        self
    }

    /// Replace the transport entirely (tests, custom auth).
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn GraphTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Aliases rendered per request by block and rate lookups. Clamped to at least 1.
    #[must_use]
    pub const fn chunk_size(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }

    /// Build the raw connector.
    ///
    /// # Errors
    /// Returns `DexError::InvalidArg` if the default endpoints cannot be parsed.
    pub fn build(self) -> Result<GraphConnector, DexError> {
        let endpoints = match self.endpoints {
            Some(e) => e,
            None => SubgraphEndpoints::sushiswap()?,
        };
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::default()));
        Ok(GraphConnector::from_parts(transport, endpoints, self.chunk))
    }

    /// Build the raw connector and hand it to a middleware builder with the
    /// given response cache already in place.
    ///
    /// # Errors
    /// Same as [`Self::build`].
    pub fn cached(self, cache: &CacheConfig) -> Result<ConnectorBuilder, DexError> {
        let raw: Arc<dyn SubgraphConnector> = Arc::new(self.build()?);
        Ok(ConnectorBuilder::new(raw).with_cache(cache))
    }
}

impl GraphConnector {
    /// Start configuring a connector.
    #[must_use]
    pub fn builder() -> GraphConnectorBuilder {
        GraphConnectorBuilder::default()
    }
}
