//! Type hierarchy lookups.
//!
//! The walker and the merger only need to know a type's direct supertypes.
//! Every collaborator that knows about types (the edited compilation unit, the
//! compiled-class index) implements [`TypeResolver`], and [`TypeLayers`] chains
//! them so source declarations shadow compiled ones.

use std::sync::Arc;

use super::model::TypeKind;

/// Hierarchy view of a single type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: Arc<str>,
    pub kind: TypeKind,
    pub superclass: Option<Arc<str>>,
    pub interfaces: Vec<Arc<str>>,
}

impl TypeInfo {
    /// A class with no declared supertypes.
    pub fn bare(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            superclass: None,
            interfaces: Vec::new(),
        }
    }
}

/// Something that can answer "what are the direct supertypes of `name`".
pub trait TypeResolver: Send + Sync {
    /// Look up a type by fully-qualified name. `None` if unknown.
    fn type_info(&self, name: &str) -> Option<TypeInfo>;
}

impl<T: TypeResolver + ?Sized> TypeResolver for Arc<T> {
    fn type_info(&self, name: &str) -> Option<TypeInfo> {
        (**self).type_info(name)
    }
}

/// Ordered stack of resolvers; the first one that knows a type wins.
#[derive(Clone, Default)]
pub struct TypeLayers {
    layers: Vec<Arc<dyn TypeResolver>>,
}

impl TypeLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the existing ones.
    pub fn with_layer(mut self, layer: Arc<dyn TypeResolver>) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl TypeResolver for TypeLayers {
    fn type_info(&self, name: &str) -> Option<TypeInfo> {
        self.layers.iter().find_map(|layer| layer.type_info(name))
    }
}

impl std::fmt::Debug for TypeLayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeLayers")
            .field("layers", &self.layers.len())
            .finish()
    }
}
