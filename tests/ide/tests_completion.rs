//! Code completion tests for the IDE layer.
//!
//! These tests verify the items built from resolved members and their
//! display order.

use gcomplete::hir::MemberDecl;
use gcomplete::ide::{CompletionKind, ResolveRequest};
use tokio_util::sync::CancellationToken;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_completions_sorted_by_distance_then_label() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let items = host
        .analysis()
        .completions(&ResolveRequest::new("app.Derived"), &CancellationToken::new());

    let priorities: Vec<u32> = items.iter().map(|i| i.sort_priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);

    assert_eq!(items[0].label.as_ref(), "own()");
    assert_eq!(items[0].sort_priority, 0);

    let at_one: Vec<&str> = items
        .iter()
        .filter(|i| i.sort_priority == 1)
        .map(|i| i.label.as_ref())
        .collect();
    assert_eq!(
        at_one,
        vec!["add(E)", "contains(Object)", "describe()", "isEmpty()", "iterator()", "size()"]
    );
}

#[test]
fn test_completion_item_details() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let items = host.analysis().completions(
        &ResolveRequest::new("app.Derived").with_prefix("si"),
        &CancellationToken::new(),
    );

    assert_eq!(items.len(), 1);
    let size = &items[0];
    assert_eq!(size.kind, CompletionKind::Method);
    assert_eq!(size.kind.to_lsp(), 2);
    assert_eq!(size.detail.as_deref(), Some("int in Set"));
    assert_eq!(size.insert_text.as_deref(), Some("size()"));
}

#[test]
fn test_field_completion() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let items = host.analysis().completions(
        &ResolveRequest::new("java.lang.Integer")
            .with_prefix("MAX")
            .with_static_only(true),
        &CancellationToken::new(),
    );

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label.as_ref(), "MAX_VALUE");
    assert_eq!(items[0].kind, CompletionKind::Field);
    assert!(items[0].insert_text.is_none());
}

#[test]
fn test_parameter_names_in_label_and_snippet() {
    let host = analysis_host(plain_unit(), jdk_slice());
    host.runtime().add_member(
        "app.Plain",
        MemberDecl::method("schedule", "void", ["java.lang.Runnable", "long"])
            .with_parameter_names(["task", "delay"]),
    );

    let items = host.analysis().completions(
        &ResolveRequest::new("app.Plain").with_prefix("sch"),
        &CancellationToken::new(),
    );

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label.as_ref(), "schedule(Runnable task, long delay)");
    assert_eq!(items[0].insert_text.as_deref(), Some("schedule(${1:task}, ${2:delay})"));
    assert!(items[0].documentation.is_some());
}

#[test]
fn test_case_sensitive_request() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let analysis = host.analysis();
    let cancel = CancellationToken::new();

    let loose = analysis.completions(&ResolveRequest::new("app.Plain").with_prefix("TOS"), &cancel);
    assert_eq!(loose.len(), 1);

    let strict = analysis.completions(
        &ResolveRequest::new("app.Plain")
            .with_prefix("TOS")
            .with_case_sensitive(true),
        &cancel,
    );
    assert!(strict.is_empty());
}
