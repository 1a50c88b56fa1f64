use serde::{Deserialize, Serialize};

/// One wrapper around a connector, described by name and its JSON settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareLayer {
    /// Layer name, e.g. `CacheMiddleware`.
    pub name: String,
    /// Layer settings as reported by the layer itself.
    pub config: serde_json::Value,
}

impl MiddlewareLayer {
    #[must_use]
    pub fn new<N: Into<String>>(name: N, config: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Layers wrapped around a connector.
///
/// `layers[0]` is the outermost wrapper; the last entry sits directly on the
/// raw connector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareStack {
    pub layers: Vec<MiddlewareLayer>,
}

impl MiddlewareStack {
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Insert a layer in front of all existing ones.
    pub fn push_outer(&mut self, layer: MiddlewareLayer) {
        self.layers.insert(0, layer);
    }

    /// Names from outermost to innermost.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// Whether a layer with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name == name)
    }
}
