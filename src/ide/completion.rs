//! Completion items built from resolved members.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::base::MemberKind;
use crate::base::constants::simple_name;

use super::candidate::{Candidate, Origin};
use super::engine::{ResolutionEngine, ResolveRequest};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Method,
    Field,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Method => 2, // Method
            CompletionKind::Field => 5,  // Field
        }
    }
}

impl From<MemberKind> for CompletionKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Method => CompletionKind::Method,
            MemberKind::Field => CompletionKind::Field,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// Text shown in the list.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a resolved member. Closer declarations sort first.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let kind = CompletionKind::from(candidate.kind());
        let mut item = Self::new(label(candidate), kind)
            .with_detail(format!(
                "{} in {}",
                simple_name(candidate.type_name()),
                simple_name(candidate.declaring_type())
            ))
            .with_priority(candidate.override_distance());

        if kind == CompletionKind::Method {
            item = item.with_insert_text(method_snippet(candidate));
        }

        match candidate.origin() {
            Origin::StructuralTransform => item.with_documentation("Generated by an AST transform"),
            Origin::RuntimeSynthesized => item.with_documentation("Added through the metaclass"),
            Origin::StaticDeclared | Origin::HostLanguageDeclared => item,
        }
    }
}

/// `put(K key, V value)` when parameter names are known, `put(K, V)` otherwise.
fn label(candidate: &Candidate) -> String {
    let key = candidate.key();
    if key.kind() == MemberKind::Field {
        return key.name().to_string();
    }

    let names = candidate.parameter_names();
    let params: Vec<String> = key
        .parameter_types()
        .iter()
        .enumerate()
        .map(|(i, ty)| match names.get(i) {
            Some(name) => format!("{} {}", simple_name(ty), name),
            None => simple_name(ty).to_string(),
        })
        .collect();
    format!("{}({})", key.name(), params.join(", "))
}

/// Snippet with one placeholder per parameter.
fn method_snippet(candidate: &Candidate) -> String {
    let key = candidate.key();
    let names = candidate.parameter_names();
    let placeholders: Vec<String> = key
        .parameter_types()
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            let text = names
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| simple_name(ty).to_string());
            format!("${{{}:{}}}", i + 1, text)
        })
        .collect();
    format!("{}({})", key.name(), placeholders.join(", "))
}

/// Member completions for a receiver, sorted by distance then label.
pub fn member_completions(
    engine: &ResolutionEngine,
    request: &ResolveRequest,
    cancel: &CancellationToken,
) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = engine
        .resolve(request, cancel)
        .candidates()
        .map(CompletionItem::from_candidate)
        .collect();

    items.sort_by(|a, b| {
        a.sort_priority
            .cmp(&b.sort_priority)
            .then_with(|| a.label.cmp(&b.label))
    });
    items
}
