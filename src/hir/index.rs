//! Compiled host-language classes.
//!
//! [`HostModel`] is the interface the engine needs from the host compiler's
//! symbol model. [`ClassIndex`] is an in-memory implementation fed from
//! pre-computed declarations (a classpath index, test fixtures).

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::error::ModelError;
use super::model::{MemberDecl, TypeDecl};
use super::types::{TypeInfo, TypeResolver};

/// Member lookup through the host compiler's model.
///
/// Calls may be slow or fail; the engine runs them on a worker and bounds the
/// wait.
pub trait HostModel: Send + Sync {
    /// Members declared directly on `type_name`. `Ok(None)` if the model does
    /// not know the type.
    fn members(&self, type_name: &str) -> Result<Option<Vec<MemberDecl>>, ModelError>;
}

impl<T: HostModel + ?Sized> HostModel for Arc<T> {
    fn members(&self, type_name: &str) -> Result<Option<Vec<MemberDecl>>, ModelError> {
        (**self).members(type_name)
    }
}

/// In-memory index of compiled classes by fully-qualified name.
#[derive(Clone, Debug, Default)]
pub struct ClassIndex {
    classes: FxHashMap<Arc<str>, TypeDecl>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any previous entry with the same name.
    pub fn add(&mut self, decl: TypeDecl) {
        self.classes.insert(decl.name.clone(), decl);
    }

    /// Builder form of [`Self::add`].
    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.add(decl);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<TypeDecl> {
        self.classes.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeResolver for ClassIndex {
    fn type_info(&self, name: &str) -> Option<TypeInfo> {
        self.classes.get(name).map(TypeDecl::info)
    }
}

impl HostModel for ClassIndex {
    fn members(&self, type_name: &str) -> Result<Option<Vec<MemberDecl>>, ModelError> {
        Ok(self.classes.get(type_name).map(|decl| decl.members.clone()))
    }
}
