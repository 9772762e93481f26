//! Members added through the runtime metaclass layer.
//!
//! Looking at a class's metaclass registers one. A registration left behind
//! changes dispatch for every later caller, so each query wraps its inspection
//! in a [`RegistrationScope`] that removes what it created when dropped, and
//! only one inspection per type may be in flight at a time.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::hir::{MemberDecl, MetaRuntime, ModelError, Registration, ResolveError};
use crate::ide::candidate::Origin;

use super::{MemberProvider, Members, ProviderQuery, collect_declared};

const PROVIDER: &str = "runtime-synthesized";

/// One mutex per type name, shared by every engine using the same runtime.
///
/// An entry lives only while some query holds or waits on it.
#[derive(Debug, Default)]
pub struct TypeLocks {
    locks: Mutex<FxHashMap<Arc<str>, Arc<Mutex<()>>>>,
}

impl TypeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock_for(&self, type_name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(type_name) {
            return Arc::clone(lock);
        }
        let lock = Arc::new(Mutex::new(()));
        locks.insert(Arc::from(type_name), Arc::clone(&lock));
        lock
    }

    /// Drop the entry for `type_name` unless another query still holds it.
    pub(crate) fn release(&self, type_name: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        // The map's copy plus `lock`.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(type_name);
        }
    }

    /// Number of types with an inspection in flight or waiting.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

/// A metaclass registration held for the duration of one inspection.
pub(crate) struct RegistrationScope<'a> {
    runtime: &'a dyn MetaRuntime,
    type_name: &'a str,
    created: bool,
}

impl<'a> RegistrationScope<'a> {
    pub fn acquire(runtime: &'a dyn MetaRuntime, type_name: &'a str) -> Result<Self, ModelError> {
        let created = runtime.register(type_name)? == Registration::Created;
        Ok(Self {
            runtime,
            type_name,
            created,
        })
    }
}

impl Drop for RegistrationScope<'_> {
    fn drop(&mut self) {
        if self.created {
            self.runtime.deregister(self.type_name);
            tracing::trace!("[RUNTIME] released transient metaclass for '{}'", self.type_name);
        }
    }
}

/// Enumerates members that exist only through runtime registration.
#[derive(Clone)]
pub struct RuntimeSynthesizedProvider {
    runtime: Arc<dyn MetaRuntime>,
    locks: Arc<TypeLocks>,
}

impl RuntimeSynthesizedProvider {
    pub fn new(runtime: Arc<dyn MetaRuntime>, locks: Arc<TypeLocks>) -> Self {
        Self { runtime, locks }
    }

    /// Read the metaclass members inside a registration scope. The caller
    /// holds the type's lock.
    fn inspect(&self, type_name: &str) -> Result<Vec<MemberDecl>, ModelError> {
        let _scope = RegistrationScope::acquire(self.runtime.as_ref(), type_name)?;
        self.runtime.meta_members(type_name)
    }
}

impl MemberProvider for RuntimeSynthesizedProvider {
    fn origin(&self) -> Origin {
        Origin::RuntimeSynthesized
    }

    fn query(&self, query: &ProviderQuery<'_>) -> Result<Members, ResolveError> {
        let lock = self.locks.lock_for(query.type_name);
        let inspected = {
            let _in_flight = lock.lock();
            self.inspect(query.type_name)
        };
        self.locks.release(query.type_name, lock);
        let decls = inspected
            .map_err(|err| ResolveError::failure(PROVIDER, query.type_name, err.to_string()))?;

        let declaring: Arc<str> = Arc::from(query.type_name);
        Ok(collect_declared(
            &decls,
            &declaring,
            Origin::RuntimeSynthesized,
            query,
        ))
    }
}

impl std::fmt::Debug for RuntimeSynthesizedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeSynthesizedProvider")
            .field("locked_types", &self.locks.len())
            .finish()
    }
}
