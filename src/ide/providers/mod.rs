//! Knowledge sources for members of a single type.
//!
//! Each provider answers for exactly one type per call and never walks the
//! hierarchy itself (the structural provider's one-level delegate lookup is
//! the only exception). The engine queries them in a fixed priority order:
//!
//! ```text
//! StructuralTransform → StaticDeclared → HostLanguageDeclared → RuntimeSynthesized
//! ```

mod declared;
mod host;
mod runtime;
mod structural;

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use crate::base::{Modifiers, SignatureKey};
use crate::hir::{DeclKind, MemberDecl, ResolveError};

use super::candidate::{Candidate, Origin};

pub use declared::StaticDeclaredProvider;
pub use host::{HostDeclaredProvider, HostWorker};
pub use runtime::{RuntimeSynthesizedProvider, TypeLocks};
pub use structural::StructuralTransformProvider;

/// A provider's answer for one type, in discovery order.
pub(crate) type Members = IndexMap<SignatureKey, Candidate>;

/// Parameters of a single provider call.
pub(crate) struct ProviderQuery<'a> {
    pub type_name: &'a str,
    pub prefix: &'a str,
    pub static_only: bool,
    pub case_sensitive: bool,
    /// Distance stamped on every candidate produced for this type.
    pub distance: u32,
    /// Shared by every host-model lookup of one resolution.
    pub host_deadline: Option<Instant>,
    pub cancel: &'a CancellationToken,
}

impl ProviderQuery<'_> {
    pub fn accepts_name(&self, name: &str) -> bool {
        matches_prefix(name, self.prefix, self.case_sensitive)
    }

    pub fn accepts(&self, name: &str, modifiers: Modifiers) -> bool {
        self.accepts_name(name) && (!self.static_only || modifiers.is_static())
    }
}

/// A source of member declarations for one type at a time.
pub(crate) trait MemberProvider: Send + Sync {
    fn origin(&self) -> Origin;

    /// Members of `query.type_name` matching the prefix. Unknown types yield
    /// an empty map.
    fn query(&self, query: &ProviderQuery<'_>) -> Result<Members, ResolveError>;
}

/// Starts-with match on a member name.
pub fn matches_prefix(name: &str, prefix: &str, case_sensitive: bool) -> bool {
    if prefix.is_empty() {
        return true;
    }
    if case_sensitive {
        name.starts_with(prefix)
    } else {
        name.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

/// Keep the first candidate reported for a key.
pub(crate) fn insert_first(members: &mut Members, candidate: Candidate) {
    members
        .entry(candidate.key().clone())
        .or_insert(candidate);
}

/// Turn declarations into candidates, expanding Groovy properties and
/// applying the query's prefix and static filters.
pub(crate) fn collect_declared(
    decls: &[MemberDecl],
    declaring_type: &Arc<str>,
    origin: Origin,
    query: &ProviderQuery<'_>,
) -> Members {
    let mut members = Members::new();
    for decl in decls {
        match decl.kind {
            DeclKind::Method | DeclKind::Field => {
                if query.accepts(&decl.name, decl.modifiers) {
                    insert_first(
                        &mut members,
                        Candidate::from_decl(decl, declaring_type, origin, query.distance),
                    );
                }
            }
            DeclKind::Property => {
                for candidate in expand_property(decl, declaring_type, origin, query.distance) {
                    if query.accepts(candidate.name(), candidate.modifiers()) {
                        insert_first(&mut members, candidate);
                    }
                }
            }
        }
    }
    members
}

/// A property is visible as a public field plus its generated accessors.
fn expand_property(
    decl: &MemberDecl,
    declaring_type: &Arc<str>,
    origin: Origin,
    distance: u32,
) -> Vec<Candidate> {
    let base = Modifiers::PUBLIC | (decl.modifiers & (Modifiers::STATIC | Modifiers::FINAL));
    let accessor = Modifiers::PUBLIC | Modifiers::SYNTHETIC | (decl.modifiers & Modifiers::STATIC);
    let suffix = capitalize(&decl.name);

    let mut out = vec![Candidate::new(
        SignatureKey::field(decl.name.as_ref()),
        declaring_type.clone(),
        decl.type_name.clone(),
        base,
        origin,
        distance,
    )];
    out.push(Candidate::new(
        SignatureKey::method(format!("get{}", suffix), Vec::<&str>::new()),
        declaring_type.clone(),
        decl.type_name.clone(),
        accessor,
        origin,
        distance,
    ));
    if matches!(decl.type_name.as_ref(), "boolean" | "java.lang.Boolean") {
        out.push(Candidate::new(
            SignatureKey::method(format!("is{}", suffix), Vec::<&str>::new()),
            declaring_type.clone(),
            decl.type_name.clone(),
            accessor,
            origin,
            distance,
        ));
    }
    if !decl.modifiers.contains(Modifiers::FINAL) {
        out.push(Candidate::new(
            SignatureKey::method(format!("set{}", suffix), [decl.type_name.as_ref()]),
            declaring_type.clone(),
            Arc::from("void"),
            accessor,
            origin,
            distance,
        ));
    }
    out
}

/// `name` → `Name`
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
