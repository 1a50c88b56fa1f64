//! Wrapping layers applied around a `SubgraphConnector`.

use std::sync::Arc;

use dexsight_types::{DexError, MiddlewareStack};

use crate::connector::SubgraphConnector;

/// A layer that takes ownership of an inner connector and hands back a wrapped one.
///
/// The wrapped connector must advertise exactly the capabilities of `inner`.
pub trait Middleware: Send + Sync {
    /// Wrap `inner`.
    fn apply(self: Box<Self>, inner: Arc<dyn SubgraphConnector>) -> Arc<dyn SubgraphConnector>;

    /// Layer name reported in `MiddlewareStack` descriptions and logs.
    fn name(&self) -> &'static str;

    /// Settings snapshot for introspection.
    fn config_json(&self) -> serde_json::Value;

    /// Check this layer against the full stack before anything is wrapped.
    ///
    /// # Errors
    /// Returns `DexError::InvalidMiddlewareStack` when the layer cannot run in `stack`.
    fn validate(&self, stack: &MiddlewareStack) -> Result<(), DexError> {
        let _ = stack;
        Ok(())
    }
}
