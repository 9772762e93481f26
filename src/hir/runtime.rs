//! Runtime metaclass registry.
//!
//! Groovy can attach methods and properties to any class at runtime through
//! its metaclass layer. Inspecting a class's metaclass registers one as a side
//! effect, so callers must undo registrations they caused; see
//! `ide::providers::runtime` for the scoped discipline.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::base::Modifiers;

use super::error::ModelError;
use super::model::MemberDecl;

/// Outcome of a metaclass registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// The type already had a metaclass; nothing to undo.
    Existing,
    /// This call created the registration; the caller owns its removal.
    Created,
}

/// Access to the host runtime's dynamic member registration.
pub trait MetaRuntime: Send + Sync {
    /// Ensure a metaclass is registered for `type_name`.
    fn register(&self, type_name: &str) -> Result<Registration, ModelError>;

    /// Members the metaclass of `type_name` adds beyond its declarations.
    fn meta_members(&self, type_name: &str) -> Result<Vec<MemberDecl>, ModelError>;

    /// Remove the metaclass registration for `type_name`.
    fn deregister(&self, type_name: &str);
}

impl<T: MetaRuntime + ?Sized> MetaRuntime for Arc<T> {
    fn register(&self, type_name: &str) -> Result<Registration, ModelError> {
        (**self).register(type_name)
    }

    fn meta_members(&self, type_name: &str) -> Result<Vec<MemberDecl>, ModelError> {
        (**self).meta_members(type_name)
    }

    fn deregister(&self, type_name: &str) {
        (**self).deregister(type_name)
    }
}

/// Who keeps a metaclass registration alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ownership {
    /// Created by `register`; `deregister` removes it.
    Transient,
    /// Created by adding members; outlives any `deregister`.
    Pinned,
}

/// In-memory metaclass registry with expando-style member additions.
#[derive(Debug, Default)]
pub struct ExpandoRegistry {
    /// Members added per type (e.g. `String.metaClass.shout = { ... }`).
    members: RwLock<FxHashMap<Arc<str>, Vec<MemberDecl>>>,
    /// Types that currently have a registered metaclass.
    registered: Mutex<FxHashMap<Arc<str>, Ownership>>,
}

impl ExpandoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dynamic member to a type's metaclass. The metaclass stays
    /// registered afterwards, even if a transient registration of the same
    /// type is released later.
    pub fn add_member(&self, type_name: &str, mut member: MemberDecl) {
        member.modifiers |= Modifiers::SYNTHETIC;
        let key: Arc<str> = Arc::from(type_name);
        self.members
            .write()
            .entry(key.clone())
            .or_default()
            .push(member);
        self.registered.lock().insert(key, Ownership::Pinned);
    }

    /// Drop all dynamic members of a type (the metaclass stays registered).
    pub fn clear_members(&self, type_name: &str) {
        self.members.write().remove(type_name);
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.registered.lock().contains_key(type_name)
    }

    pub fn registration_count(&self) -> usize {
        self.registered.lock().len()
    }
}

impl MetaRuntime for ExpandoRegistry {
    fn register(&self, type_name: &str) -> Result<Registration, ModelError> {
        let mut registered = self.registered.lock();
        if registered.contains_key(type_name) {
            Ok(Registration::Existing)
        } else {
            registered.insert(Arc::from(type_name), Ownership::Transient);
            Ok(Registration::Created)
        }
    }

    fn meta_members(&self, type_name: &str) -> Result<Vec<MemberDecl>, ModelError> {
        if !self.is_registered(type_name) {
            return Err(ModelError::Unavailable(format!(
                "no metaclass registered for {}",
                type_name
            )));
        }
        Ok(self
            .members
            .read()
            .get(type_name)
            .cloned()
            .unwrap_or_default())
    }

    fn deregister(&self, type_name: &str) {
        let mut registered = self.registered.lock();
        if registered.get(type_name) == Some(&Ownership::Transient) {
            registered.remove(type_name);
        }
    }
}
