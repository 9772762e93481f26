//! AnalysisHost and Analysis: state ownership for completion requests.
//!
//! The `AnalysisHost` owns the edited document, the compiled-class index, the
//! metaclass registry and the host-model worker. `analysis()` hands out an
//! `Analysis` that can be moved to another thread and queried there.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_source(unit);
//! host.add_class(TypeDecl::interface("java.util.Set"));
//!
//! let analysis = host.analysis();
//! let request = ResolveRequest::new("app.Team").with_prefix("ad");
//! let items = analysis.completions(&request, &CancellationToken::new());
//! ```
//!
//! The class index is copy-on-write: an `Analysis` taken before `add_class`
//! keeps seeing the old index. The document is shared, and edits wait for any
//! in-flight host-model lookup to finish.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::hir::{
    ClassIndex, Document, ExpandoRegistry, HierarchyWalker, SourceUnit, TypeDecl, TypeLayers,
    TypeResolver,
};

use super::access::{AccessContext, Relation};
use super::candidate::ResultSet;
use super::completion::{CompletionItem, member_completions};
use super::config::CompletionConfig;
use super::engine::{ResolutionEngine, ResolveRequest};
use super::providers::{HostDeclaredProvider, HostWorker, RuntimeSynthesizedProvider, TypeLocks};

/// Threads in the default host-model pool.
const HOST_WORKER_THREADS: usize = 2;

/// Owns all mutable state for completion.
#[derive(Debug)]
pub struct AnalysisHost {
    document: Document,
    classes: Arc<ClassIndex>,
    runtime: Arc<ExpandoRegistry>,
    worker: HostWorker,
    locks: Arc<TypeLocks>,
    config: CompletionConfig,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a host with an empty document and class index.
    pub fn new() -> Self {
        let worker = HostWorker::dedicated(HOST_WORKER_THREADS).unwrap_or_else(|err| {
            tracing::warn!("[HOST] dedicated worker unavailable, using global pool: {}", err);
            HostWorker::global()
        });
        Self::with_worker(worker)
    }

    /// Create a host running host-model lookups on `worker`.
    pub fn with_worker(worker: HostWorker) -> Self {
        Self {
            document: Document::default(),
            classes: Arc::new(ClassIndex::new()),
            runtime: Arc::new(ExpandoRegistry::new()),
            worker,
            locks: Arc::new(TypeLocks::new()),
            config: CompletionConfig::default(),
        }
    }

    /// Replace the edited compilation unit.
    pub fn set_source(&self, unit: SourceUnit) {
        self.document.replace(unit);
    }

    /// Apply an in-place edit to the compilation unit.
    pub fn edit_source<R>(&self, f: impl FnOnce(&mut SourceUnit) -> R) -> R {
        self.document.edit(f)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Add or replace a compiled class.
    pub fn add_class(&mut self, decl: TypeDecl) {
        Arc::make_mut(&mut self.classes).add(decl);
    }

    /// Replace the whole compiled-class index.
    pub fn set_classes(&mut self, classes: ClassIndex) {
        self.classes = Arc::new(classes);
    }

    pub fn classes(&self) -> &ClassIndex {
        &self.classes
    }

    /// The metaclass registry, for adding runtime members.
    pub fn runtime(&self) -> &Arc<ExpandoRegistry> {
        &self.runtime
    }

    pub fn set_config(&mut self, config: CompletionConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Get a queryable view of the current state.
    pub fn analysis(&self) -> Analysis {
        let types: Arc<dyn TypeResolver> = Arc::new(
            TypeLayers::new()
                .with_layer(Arc::new(self.document.clone()))
                .with_layer(self.classes.clone()),
        );
        let host = HostDeclaredProvider::new(
            self.document.clone(),
            self.classes.clone(),
            self.worker.clone(),
        );
        let runtime = RuntimeSynthesizedProvider::new(self.runtime.clone(), self.locks.clone());
        let engine = ResolutionEngine::new(
            self.document.clone(),
            types.clone(),
            host,
            runtime,
            self.config.clone(),
        );
        Analysis { types, engine }
    }
}

/// A queryable view handed out by [`AnalysisHost::analysis`].
#[derive(Clone)]
pub struct Analysis {
    types: Arc<dyn TypeResolver>,
    engine: ResolutionEngine,
}

impl Analysis {
    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    /// Resolve the members visible on a receiver.
    pub fn resolve(&self, request: &ResolveRequest, cancel: &CancellationToken) -> ResultSet {
        self.engine.resolve(request, cancel)
    }

    /// Completion items for a receiver, sorted for display.
    pub fn completions(
        &self,
        request: &ResolveRequest,
        cancel: &CancellationToken,
    ) -> Vec<CompletionItem> {
        member_completions(&self.engine, request, cancel)
    }

    /// Access levels code in `caller` has on members of `receiver`.
    pub fn access_for(&self, caller: &str, receiver: &str) -> AccessContext {
        let walker = HierarchyWalker::new(self.types.as_ref());
        AccessContext::for_relation(Relation::between(&walker, caller, receiver))
    }
}

impl std::fmt::Debug for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analysis").field("engine", &self.engine).finish()
    }
}
