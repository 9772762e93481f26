//! IDE features: member resolution and completion.
//!
//! This module sits between the declaration model (HIR) and an editor's
//! completion handler. Given a receiver type and a typed prefix it produces the
//! members visible at that point, merged from four knowledge sources.
//!
//! ## Design Principles
//!
//! 1. **Closed provider set**: four sources queried in a fixed order
//! 2. **Deterministic merging**: the winner for a signature never depends on
//!    which source answered first
//! 3. **No LSP types**: uses our own types, converted at the LSP boundary
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use gcomplete::ide::{AnalysisHost, ResolveRequest};
//!
//! let mut host = AnalysisHost::new();
//! host.set_source(unit);
//!
//! let analysis = host.analysis();
//! let items = analysis.completions(&ResolveRequest::new("app.Team"), &cancel);
//! ```

mod access;
mod analysis;
mod candidate;
mod completion;
mod config;
mod engine;
mod merge;
mod providers;

pub use access::{AccessContext, AccessPolicy, Relation};
pub use analysis::{Analysis, AnalysisHost};
pub use candidate::{Candidate, ResultSet};
pub use completion::{CompletionItem, CompletionKind, member_completions};
pub use config::CompletionConfig;
pub use engine::{ResolutionEngine, ResolveRequest};
pub use merge::{CandidateMerger, InterfacePreferences, Winner};
pub use providers::{
    HostDeclaredProvider, HostWorker, RuntimeSynthesizedProvider, StaticDeclaredProvider,
    StructuralTransformProvider, TypeLocks, matches_prefix,
};
