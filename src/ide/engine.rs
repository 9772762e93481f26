//! Member resolution for one receiver type.
//!
//! ```text
//! HierarchyWalker ──(type, distance)──► providers (fixed order) ──► CandidateMerger
//!                                                                        │
//!                                                     AccessPolicy ◄─────┘
//! ```
//!
//! A request is synchronous and carries a [`CancellationToken`]. Provider
//! failures are logged and skipped; `resolve` always returns a result set.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::hir::{Document, HierarchyWalker, TypeResolver};

use super::access::{AccessContext, AccessPolicy};
use super::candidate::ResultSet;
use super::config::CompletionConfig;
use super::merge::CandidateMerger;
use super::providers::{
    HostDeclaredProvider, MemberProvider, ProviderQuery, RuntimeSynthesizedProvider,
    StaticDeclaredProvider, StructuralTransformProvider,
};

/// What to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Receiver type; generics are erased and primitives boxed.
    pub type_name: Arc<str>,
    /// Typed prefix of the member name.
    pub prefix: String,
    /// Only static members (receiver is a class reference).
    pub static_only: bool,
    pub access: AccessContext,
    /// Overrides `CompletionConfig::case_sensitive_prefix_match` when set.
    pub case_sensitive: Option<bool>,
}

impl ResolveRequest {
    pub fn new(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            type_name: type_name.into(),
            prefix: String::new(),
            static_only: false,
            access: AccessContext::default(),
            case_sensitive: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_static_only(mut self, static_only: bool) -> Self {
        self.static_only = static_only;
        self
    }

    pub fn with_access(mut self, access: AccessContext) -> Self {
        self.access = access;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

/// Resolves the visible members of a type from every knowledge source.
#[derive(Clone)]
pub struct ResolutionEngine {
    types: Arc<dyn TypeResolver>,
    structural: StructuralTransformProvider,
    declared: StaticDeclaredProvider,
    host: HostDeclaredProvider,
    runtime: RuntimeSynthesizedProvider,
    config: CompletionConfig,
}

impl ResolutionEngine {
    /// Build an engine over `document`.
    ///
    /// `types` must see both the document and the compiled classes, since the
    /// walk crosses from source types into library types.
    pub fn new(
        document: Document,
        types: Arc<dyn TypeResolver>,
        host: HostDeclaredProvider,
        runtime: RuntimeSynthesizedProvider,
        config: CompletionConfig,
    ) -> Self {
        let host = host.with_timeouts(config.host_timeout, config.host_poll_interval);
        let declared = StaticDeclaredProvider::new(document.clone());
        let structural = StructuralTransformProvider::new(
            document,
            Arc::clone(&types),
            declared.clone(),
            host.clone(),
        );
        Self {
            types,
            structural,
            declared,
            host,
            runtime,
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Providers in query order.
    fn providers(&self) -> [&dyn MemberProvider; 4] {
        [&self.structural, &self.declared, &self.host, &self.runtime]
    }

    /// Resolve the members of `request.type_name` visible under the request's
    /// access context.
    ///
    /// On cancellation the members gathered so far are filtered and returned.
    pub fn resolve(&self, request: &ResolveRequest, cancel: &CancellationToken) -> ResultSet {
        let walker = HierarchyWalker::new(self.types.as_ref());
        let merger = CandidateMerger::new(walker, &self.config.interface_preferences);
        let static_only = request.static_only || self.config.static_members_only;
        let case_sensitive = request
            .case_sensitive
            .unwrap_or(self.config.case_sensitive_prefix_match);

        let host_deadline = Instant::now().checked_add(self.config.host_budget);
        let mut results = ResultSet::new();
        let mut types_visited = 0usize;
        let mut cancelled = false;

        'walk: for step in walker.walk(&request.type_name) {
            types_visited += 1;
            let query = ProviderQuery {
                type_name: &step.info.name,
                prefix: &request.prefix,
                static_only,
                case_sensitive,
                distance: step.distance,
                host_deadline,
                cancel,
            };

            for provider in self.providers() {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break 'walk;
                }
                match provider.query(&query) {
                    Ok(members) => {
                        for candidate in members.into_values() {
                            merger.merge(&mut results, candidate);
                        }
                    }
                    Err(err) if err.is_cancellation() => {
                        cancelled = true;
                        break 'walk;
                    }
                    Err(err) => {
                        tracing::warn!(
                            "[ENGINE] {} skipped for '{}': {}",
                            provider.origin().name(),
                            step.info.name,
                            err
                        );
                    }
                }
            }
        }

        if cancelled {
            tracing::debug!(
                "[ENGINE] resolution of '{}' cancelled after {} types",
                request.type_name,
                types_visited
            );
        }

        let policy = AccessPolicy::new(self.config.honour_access_modifiers);
        let before = results.len();
        results.retain(|candidate| policy.is_visible(candidate, request.access, static_only));

        tracing::debug!(
            "[ENGINE] '{}' prefix '{}': {} types, {} candidates, {} visible",
            request.type_name,
            request.prefix,
            types_visited,
            before,
            results.len()
        );
        results
    }
}

impl std::fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("host", &self.host)
            .field("runtime", &self.runtime)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
