use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dexsight_core::{
    Capability, Clock, DexError, DexsightConfig, SubgraphConnector, SystemClock, TokenLabel,
};

/// Orchestrator that routes page-level requests to registered connectors.
pub struct Dexsight {
    pub(crate) connectors: Vec<Arc<dyn SubgraphConnector>>,
    pub(crate) cfg: DexsightConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Builder for constructing a `Dexsight` orchestrator with custom configuration.
pub struct DexsightBuilder {
    connectors: Vec<Arc<dyn SubgraphConnector>>,
    cfg: DexsightConfig,
    clock: Arc<dyn Clock>,
}

impl Default for DexsightBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DexsightBuilder {
    /// Create a builder with the default configuration and the system clock.
    ///
    /// Starts with no connectors; register at least one via [`Self::with_connector`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: DexsightConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Register a connector.
    ///
    /// Each capability is served by the first registered connector that
    /// advertises it, so registration order doubles as priority.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn SubgraphConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DexsightConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Source of "now" for lookback windows. Tests pin this.
    #[must_use]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Bound on each individual connector call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Deadline for fan-out stages (historical batches, per-pair fallbacks).
    ///
    /// When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Rows per chart page.
    #[must_use]
    pub const fn chart_page_size(mut self, rows: usize) -> Self {
        self.cfg.chart_page_size = rows;
        self
    }

    /// Spacing of hourly rate samples.
    #[must_use]
    pub const fn rate_interval(mut self, interval: Duration) -> Self {
        self.cfg.rate_interval = interval;
        self
    }

    /// Timestamps resolved per block lookup.
    #[must_use]
    pub const fn block_batch_size(mut self, size: usize) -> Self {
        self.cfg.block_batch_size = size;
        self
    }

    /// Token relabelled during enrichment; `None` disables relabelling.
    #[must_use]
    pub fn token_label(mut self, label: Option<TokenLabel>) -> Self {
        self.cfg.token_label = label;
        self
    }

    /// Build the `Dexsight` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered, or if a page size,
    /// batch size or rate interval is zero.
    pub fn build(self) -> Result<Dexsight, DexError> {
        if self.connectors.is_empty() {
            return Err(DexError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.chart_page_size == 0 {
            return Err(DexError::InvalidArg("chart_page_size must be positive".into()));
        }
        if self.cfg.block_batch_size == 0 {
            return Err(DexError::InvalidArg("block_batch_size must be positive".into()));
        }
        if self.cfg.rate_interval.as_secs() == 0 {
            return Err(DexError::InvalidArg(
                "rate_interval must be at least one second".into(),
            ));
        }

        Ok(Dexsight {
            connectors: self.connectors,
            cfg: self.cfg,
            clock: self.clock,
        })
    }
}

impl Dexsight {
    /// Start building a new `Dexsight` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use dexsight_subgraph::GraphConnector;
    ///
    /// let subgraph = GraphConnector::builder()
    ///     .cached(&dexsight::CacheConfig::default())?
    ///     .build()?;
    /// let dex = dexsight::Dexsight::builder()
    ///     .with_connector(subgraph)
    ///     .request_timeout(std::time::Duration::from_secs(30))
    ///     .build()?;
    /// let table = dex.all_pair_data().await?;
    /// ```
    #[must_use]
    pub fn builder() -> DexsightBuilder {
        DexsightBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DexsightConfig {
        &self.cfg
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// First registered connector that advertises `cap`.
    pub(crate) fn route(&self, cap: Capability) -> Result<Arc<dyn SubgraphConnector>, DexError> {
        self.connectors
            .iter()
            .find(|c| c.supports(cap))
            .cloned()
            .ok_or_else(|| DexError::unsupported(cap.as_str()))
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dexsight::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, DexError>
    where
        Fut: core::future::Future<Output = Result<T, DexError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(DexError::provider_timeout(connector_name, capability)))
    }
}

/// Run `fut` under an optional deadline, mapping expiry to `RequestTimeout`.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    capability: &'static str,
    fut: Fut,
) -> Result<T, DexError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| DexError::request_timeout(capability)),
        None => Ok(fut.await),
    }
}
