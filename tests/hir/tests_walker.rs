//! Hierarchy walk tests.
//!
//! These tests check the order and distances the walker produces over the
//! JDK slice plus Groovy source types.

use std::collections::HashSet;
use std::sync::Arc;

use gcomplete::hir::{ClassIndex, HierarchyWalker, TypeDecl, TypeLayers};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

fn types() -> TypeLayers {
    TypeLayers::new()
        .with_layer(Arc::new(collection_unit()))
        .with_layer(Arc::new(jdk_slice()))
}

fn walk(types: &TypeLayers, start: &str) -> Vec<(String, u32)> {
    HierarchyWalker::new(types)
        .walk(start)
        .map(|step| (step.info.name.to_string(), step.distance))
        .collect()
}

// =============================================================================
// ORDER AND DISTANCES
// =============================================================================

#[rstest]
#[case::boxed_class(
    "java.lang.Integer",
    &[("java.lang.Integer", 0), ("java.lang.Number", 1), ("java.lang.Comparable", 1), ("java.lang.Object", 2)]
)]
#[case::primitive_receiver(
    "int",
    &[("java.lang.Integer", 0), ("java.lang.Number", 1), ("java.lang.Comparable", 1), ("java.lang.Object", 2)]
)]
#[case::source_type_with_interfaces(
    "app.Derived",
    &[
        ("app.Derived", 0),
        ("app.Base", 1),
        ("java.util.Set", 1),
        ("java.util.Collection", 1),
        ("java.lang.Iterable", 2),
        ("java.lang.Object", 2),
    ]
)]
#[case::generic_interface_receiver(
    "java.util.List<java.lang.String>",
    &[("java.util.List", 0), ("java.util.Collection", 1), ("java.lang.Iterable", 2), ("java.lang.Object", 1)]
)]
#[case::root_only("java.lang.Object", &[("java.lang.Object", 0)])]
#[case::unknown("app.Missing", &[])]
fn test_walk_order(#[case] start: &str, #[case] expected: &[(&str, u32)]) {
    let types = types();
    let expected: Vec<(String, u32)> = expected
        .iter()
        .map(|(name, distance)| (name.to_string(), *distance))
        .collect();
    assert_eq!(walk(&types, start), expected);
}

#[rstest]
#[case("app.Derived")]
#[case("app.Base")]
#[case("java.lang.Integer")]
#[case("java.util.Set")]
#[case("boolean")]
fn test_walk_never_repeats_and_root_is_last(#[case] start: &str) {
    let types = types();
    let steps = walk(&types, start);
    if steps.is_empty() {
        return;
    }

    let mut seen = HashSet::new();
    for (name, _) in &steps {
        assert!(seen.insert(name.clone()), "{} visited twice walking {}", name, start);
    }
    let roots = steps.iter().filter(|(name, _)| name == "java.lang.Object").count();
    assert_eq!(roots, 1);
    assert_eq!(steps.last().unwrap().0, "java.lang.Object");
}

// =============================================================================
// MALFORMED HIERARCHIES
// =============================================================================

#[test]
fn test_superclass_cycle_terminates() {
    let index = ClassIndex::new()
        .with(TypeDecl::class("a.A").extends("a.B"))
        .with(TypeDecl::class("a.B").extends("a.A"));
    let types = TypeLayers::new().with_layer(Arc::new(index));

    let steps = walk(&types, "a.A");
    assert_eq!(
        steps,
        vec![
            ("a.A".to_string(), 0),
            ("a.B".to_string(), 1),
            ("java.lang.Object".to_string(), 2)
        ]
    );
}

#[test]
fn test_interface_cycle_terminates() {
    let index = ClassIndex::new()
        .with(TypeDecl::class("a.C").implements("a.I"))
        .with(TypeDecl::interface("a.I").implements("a.J"))
        .with(TypeDecl::interface("a.J").implements("a.I"));
    let types = TypeLayers::new().with_layer(Arc::new(index));

    let names: Vec<String> = walk(&types, "a.C").into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["a.C", "a.I", "a.J", "java.lang.Object"]);
}

#[test]
fn test_unresolved_superclass_stops_chain() {
    let index = ClassIndex::new().with(TypeDecl::class("a.Orphan").extends("missing.Parent"));
    let types = TypeLayers::new().with_layer(Arc::new(index));

    assert_eq!(
        walk(&types, "a.Orphan"),
        vec![("a.Orphan".to_string(), 0), ("java.lang.Object".to_string(), 1)]
    );
}

// =============================================================================
// ASSIGNABILITY
// =============================================================================

#[rstest]
#[case("java.util.Collection", "app.Derived", true)]
#[case("java.lang.Iterable", "app.Derived", true)]
#[case("app.Base", "app.Derived", true)]
#[case("java.lang.Comparable", "int", true)]
#[case("java.util.List", "app.Derived", false)]
#[case("app.Derived", "app.Base", false)]
fn test_is_assignable(#[case] target: &str, #[case] source: &str, #[case] expected: bool) {
    let types = types();
    assert_eq!(HierarchyWalker::new(&types).is_assignable(target, source), expected);
}
