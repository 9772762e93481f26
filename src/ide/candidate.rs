//! Candidates and result sets.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::constants::OBJECT_TYPE;
use crate::base::{MemberKind, Modifiers, SignatureKey};
use crate::hir::{DeclKind, MemberDecl};

/// Which knowledge source reported a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Origin {
    StructuralTransform,
    StaticDeclared,
    HostLanguageDeclared,
    RuntimeSynthesized,
}

impl Origin {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Origin::StructuralTransform => "structural-transform",
            Origin::StaticDeclared => "static-declared",
            Origin::HostLanguageDeclared => "host-declared",
            Origin::RuntimeSynthesized => "runtime-synthesized",
        }
    }
}

/// One source's report of a member, tagged with hierarchy distance.
///
/// Fields are read-only; a candidate is built once by a provider and then
/// either dropped or moved into a [`ResultSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    key: SignatureKey,
    declaring_type: Arc<str>,
    type_name: Arc<str>,
    parameter_names: Vec<Arc<str>>,
    modifiers: Modifiers,
    origin: Origin,
    override_distance: u32,
}

impl Candidate {
    pub(crate) fn new(
        key: SignatureKey,
        declaring_type: Arc<str>,
        type_name: Arc<str>,
        modifiers: Modifiers,
        origin: Origin,
        override_distance: u32,
    ) -> Self {
        Self {
            key,
            declaring_type,
            type_name,
            parameter_names: Vec::new(),
            modifiers,
            origin,
            override_distance,
        }
    }

    /// Build from a method or field declaration. Properties are expanded by
    /// the caller.
    pub(crate) fn from_decl(
        decl: &MemberDecl,
        declaring_type: &Arc<str>,
        origin: Origin,
        override_distance: u32,
    ) -> Self {
        let key = match decl.kind {
            DeclKind::Method => {
                SignatureKey::method(decl.name.as_ref(), decl.parameters.iter().map(|p| p.as_ref()))
            }
            DeclKind::Field | DeclKind::Property => SignatureKey::field(decl.name.as_ref()),
        };
        let mut candidate = Self::new(
            key,
            declaring_type.clone(),
            decl.type_name.clone(),
            decl.modifiers,
            origin,
            override_distance,
        );
        if decl.parameter_names.len() == decl.parameters.len() {
            candidate.parameter_names = decl.parameter_names.clone();
        }
        candidate
    }

    /// Re-home a candidate onto another declaring type and source.
    pub(crate) fn delegated(self, declaring_type: Arc<str>, origin: Origin) -> Self {
        Self {
            declaring_type,
            origin,
            modifiers: self.modifiers | Modifiers::SYNTHETIC,
            ..self
        }
    }

    /// Move under a different result key.
    pub(crate) fn rekeyed(self, key: SignatureKey) -> Self {
        Self { key, ..self }
    }

    pub(crate) fn origin(&self) -> Origin {
        self.origin
    }

    pub fn key(&self) -> &SignatureKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn kind(&self) -> MemberKind {
        self.key.kind()
    }

    /// Fully-qualified name of the type that reports this member.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Return type for methods, value type for fields.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parameter_names(&self) -> &[Arc<str>] {
        &self.parameter_names
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// Hops from the queried type to the declaring type.
    pub fn override_distance(&self) -> u32 {
        self.override_distance
    }

    /// Declared on the universal root type.
    pub fn is_root_declared(&self) -> bool {
        self.declaring_type.as_ref() == OBJECT_TYPE
    }
}

/// Final mapping from signature to the winning candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: FxHashMap<SignatureKey, Candidate>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &SignatureKey) -> Option<&Candidate> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &SignatureKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignatureKey, &Candidate)> {
        self.entries.iter()
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values()
    }

    /// All candidates with the given member name (any kind or variant).
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Candidate> + 'a {
        self.entries.values().filter(move |c| c.name() == name)
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.entries.into_values().collect()
    }

    /// Store a candidate under its own key, replacing any previous entry.
    pub(crate) fn insert(&mut self, candidate: Candidate) -> Option<Candidate> {
        self.entries.insert(candidate.key.clone(), candidate)
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Candidate) -> bool) {
        self.entries.retain(|_, candidate| keep(candidate));
    }
}

impl IntoIterator for ResultSet {
    type Item = (SignatureKey, Candidate);
    type IntoIter = std::collections::hash_map::IntoIter<SignatureKey, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
