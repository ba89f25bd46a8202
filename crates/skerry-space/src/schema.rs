//! Layer schema: the fixed set of layers a grid was built with.

use indexmap::IndexMap;
use skerry_core::LayerKind;

/// An ordered mapping from layer name to occupancy kind.
///
/// Declaration order matters: it is the iteration order used when a cell's
/// contents are enumerated. The schema is fixed once the grid is
/// constructed.
#[derive(Clone, Debug, Default)]
pub struct LayerSchema {
    layers: IndexMap<String, LayerKind>,
}

impl LayerSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, returning the schema for chaining.
    ///
    /// Re-declaring an existing name overwrites its kind but keeps its
    /// original declaration position.
    pub fn with_layer(mut self, name: impl Into<String>, kind: LayerKind) -> Self {
        self.layers.insert(name.into(), kind);
        self
    }

    /// The occupancy kind of a layer, or `None` if undeclared.
    pub fn kind_of(&self, name: &str) -> Option<LayerKind> {
        self.layers.get(name).copied()
    }

    /// Declaration position of a layer, or `None` if undeclared.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.layers.get_index_of(name)
    }

    /// Number of declared layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the schema declares no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate `(name, kind)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LayerKind)> + '_ {
        self.layers.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_preserved() {
        let schema = LayerSchema::new()
            .with_layer("Land", LayerKind::Single)
            .with_layer("Weather", LayerKind::Single)
            .with_layer("Ships", LayerKind::Multi);
        let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Land", "Weather", "Ships"]);
        assert_eq!(schema.position_of("Ships"), Some(2));
    }

    #[test]
    fn undeclared_layer_is_none() {
        let schema = LayerSchema::new().with_layer("Land", LayerKind::Single);
        assert_eq!(schema.kind_of("People"), None);
        assert_eq!(schema.kind_of("Land"), Some(LayerKind::Single));
    }
}
