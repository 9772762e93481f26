//! The compilation unit being edited.
//!
//! [`SourceUnit`] holds the type declarations the parser produced for the
//! current file. [`Document`] wraps it in a shared read/write lock so the editor
//! can apply edits while resolution reads a consistent snapshot.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard};

use super::model::TypeDecl;
use super::types::{TypeInfo, TypeResolver};

/// Declarations parsed from one Groovy source file.
#[derive(Clone, Debug, Default)]
pub struct SourceUnit {
    /// Package declared at the top of the file, if any.
    pub package: Option<Arc<str>>,
    /// Types by fully-qualified name, in source order.
    types: IndexMap<Arc<str>, TypeDecl>,
}

impl SourceUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package name.
    pub fn with_package(mut self, package: impl Into<Arc<str>>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Add a type, replacing any previous declaration with the same name.
    pub fn add_type(&mut self, decl: TypeDecl) {
        self.types.insert(decl.name.clone(), decl);
    }

    /// Builder form of [`Self::add_type`].
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.add_type(decl);
        self
    }

    pub fn remove_type(&mut self, name: &str) -> Option<TypeDecl> {
        self.types.shift_remove(name)
    }

    pub fn type_decl(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for SourceUnit {
    fn type_info(&self, name: &str) -> Option<TypeInfo> {
        self.types.get(name).map(TypeDecl::info)
    }
}

/// Shared handle to the edited compilation unit.
///
/// Clones share the same underlying unit.
#[derive(Clone, Debug, Default)]
pub struct Document {
    unit: Arc<RwLock<SourceUnit>>,
}

impl Document {
    pub fn new(unit: SourceUnit) -> Self {
        Self {
            unit: Arc::new(RwLock::new(unit)),
        }
    }

    /// Read-locked snapshot.
    ///
    /// Recursive so a resolution that already holds a snapshot further up the
    /// stack cannot deadlock behind a queued writer.
    pub fn snapshot(&self) -> RwLockReadGuard<'_, SourceUnit> {
        self.unit.read_recursive()
    }

    /// Apply an edit under the write lock.
    pub fn edit<R>(&self, f: impl FnOnce(&mut SourceUnit) -> R) -> R {
        let mut unit = self.unit.write();
        f(&mut unit)
    }

    /// Replace the whole unit (a fresh parse).
    pub fn replace(&self, unit: SourceUnit) {
        *self.unit.write() = unit;
    }
}

impl TypeResolver for Document {
    fn type_info(&self, name: &str) -> Option<TypeInfo> {
        self.snapshot().type_info(name)
    }
}
