//! Builder for composing a connector with middleware layers.
//!
//! Layers form an onion around the raw connector. They are stored
//! outermost-first (the last layer added is the outermost) and applied in
//! reverse during `build()`:
//!
//! ```text
//! builder.with_cache(&cfg).layer(Box::new(Custom))
//!
//! Storage: [Custom, Cache]
//! Result:  Custom(Cache(Raw))
//! ```
//!
//! The same ordering is reported by [`ConnectorBuilder::describe`], whose
//! `layers[0]` is the outermost layer.

use std::collections::HashSet;
use std::sync::Arc;

use dexsight_core::{
    CacheConfig, DexError, Middleware, MiddlewareLayer, MiddlewareStack, SubgraphConnector,
};
use serde_json::json;

use crate::cache::CacheMiddleware;

/// Composes a raw connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn SubgraphConnector>,
    /// Outermost first.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    #[must_use]
    pub fn new(raw: Arc<dyn SubgraphConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the response cache as the outermost layer.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != "CacheMiddleware");
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the response cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != "CacheMiddleware");
        self
    }

    /// Add an arbitrary layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Snapshot of the configured layers, outermost first, with the raw
    /// connector appended as the innermost entry.
    #[must_use]
    pub fn describe(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack {
            layers: self
                .layers
                .iter()
                .map(|l| MiddlewareLayer::new(l.name(), l.config_json()))
                .collect(),
        };
        stack.layers.push(MiddlewareLayer::new(
            "RawConnector",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Validate the stack and wrap the raw connector.
    ///
    /// # Errors
    /// Returns `DexError::InvalidMiddlewareStack` when two layers share a name
    /// or a layer rejects the stack in `Middleware::validate`.
    pub fn build(self) -> Result<Arc<dyn SubgraphConnector>, DexError> {
        let stack = self.describe();

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.name()) {
                return Err(DexError::InvalidMiddlewareStack {
                    message: format!("duplicate layer {}", layer.name()),
                });
            }
            layer.validate(&stack)?;
        }

        let mut acc = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            #[cfg(feature = "tracing")]
            tracing::debug!(layer = m.name(), connector = acc.name(), "applying middleware");
            acc = m.apply(acc);
        }
        Ok(acc)
    }
}
