//! Member resolution tests for the IDE layer.
//!
//! These tests drive the full engine: hierarchy walk, all four sources,
//! merging and access filtering.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use gcomplete::hir::{
    ClassIndex, ExpandoRegistry, HostModel, MemberDecl, MetaRuntime, ModelError, Registration,
    SourceUnit, TypeDecl,
};
use gcomplete::ide::{CompletionConfig, ResolveRequest};
use gcomplete::{MemberKind, Modifiers, SignatureKey};
use tokio_util::sync::CancellationToken;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// COLLABORATOR DOUBLES
// =============================================================================

/// A metaclass runtime that always fails to enumerate.
struct BrokenRuntime;

impl MetaRuntime for BrokenRuntime {
    fn register(&self, _type_name: &str) -> Result<Registration, ModelError> {
        Ok(Registration::Existing)
    }

    fn meta_members(&self, type_name: &str) -> Result<Vec<MemberDecl>, ModelError> {
        Err(ModelError::corrupt(type_name, "metaclass in inconsistent state"))
    }

    fn deregister(&self, _type_name: &str) {}
}

/// A host model that never answers in time.
struct SlowModel(Duration);

impl HostModel for SlowModel {
    fn members(&self, _type_name: &str) -> Result<Option<Vec<MemberDecl>>, ModelError> {
        thread::sleep(self.0);
        Ok(None)
    }
}

/// Answers from an index, but hangs on one type.
struct HangsOn {
    index: ClassIndex,
    slow: &'static str,
    delay: Duration,
}

impl HostModel for HangsOn {
    fn members(&self, type_name: &str) -> Result<Option<Vec<MemberDecl>>, ModelError> {
        if type_name == self.slow {
            thread::sleep(self.delay);
        }
        self.index.members(type_name)
    }
}

/// Answers from an index, and cancels the request when asked about `trigger`.
struct CancellingModel {
    index: ClassIndex,
    trigger: &'static str,
    token: CancellationToken,
}

impl HostModel for CancellingModel {
    fn members(&self, type_name: &str) -> Result<Option<Vec<MemberDecl>>, ModelError> {
        if type_name == self.trigger {
            self.token.cancel();
        }
        self.index.members(type_name)
    }
}

// =============================================================================
// PRECEDENCE
// =============================================================================

#[test]
fn test_narrower_interface_wins_at_equal_distance() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let results = resolve(&host, "app.Derived", "");

    // Base, Set and Collection all declare size() at distance 1.
    let size = results.get(&no_args("size")).expect("size() should resolve");
    assert_eq!(size.declaring_type(), "java.util.Set");
    assert_eq!(size.override_distance(), 1);

    let add = results.get(&SignatureKey::method("add", ["E"])).unwrap();
    assert_eq!(add.declaring_type(), "java.util.Set");

    // Only Collection declares these.
    assert_eq!(results.get(&no_args("isEmpty")).unwrap().declaring_type(), "java.util.Collection");
    assert_eq!(
        results.get(&SignatureKey::method("forEach", ["java.util.function.Consumer"]))
            .unwrap()
            .override_distance(),
        2
    );
}

#[test]
fn test_strictly_closer_superclass_beats_interface() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let results = resolve(&host, "app.Counted", "si");

    let size = results.get(&no_args("size")).unwrap();
    assert_eq!(size.declaring_type(), "app.Base");
    assert_eq!(size.override_distance(), 1);
}

#[test]
fn test_root_member_kept_when_uncontested() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let results = resolve(&host, "app.Plain", "tos");

    assert_eq!(results.len(), 1);
    let to_string = results.get(&no_args("toString")).unwrap();
    assert_eq!(to_string.declaring_type(), "java.lang.Object");
    assert!(to_string.is_root_declared());
}

#[test]
fn test_override_beats_root_member() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let results = resolve(&host, "java.lang.Integer", "tos");

    let to_string = results.get(&no_args("toString")).unwrap();
    assert_eq!(to_string.declaring_type(), "java.lang.Integer");
    assert_eq!(to_string.override_distance(), 0);
}

#[test]
fn test_closer_declaration_wins_through_chain() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let results = resolve(&host, "java.lang.Integer", "intV");

    let int_value = results.get(&no_args("intValue")).unwrap();
    assert_eq!(int_value.declaring_type(), "java.lang.Integer");
    assert!(!int_value.modifiers().contains(Modifiers::ABSTRACT));
}

#[test]
fn test_primitive_receiver_is_boxed() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let results = resolve(&host, "int", "double");

    assert_eq!(names(&results), vec!["doubleValue"]);
    assert_eq!(
        results.get(&no_args("doubleValue")).unwrap().declaring_type(),
        "java.lang.Number"
    );
}

#[test]
fn test_static_and_instance_variants_both_kept() {
    let host = analysis_host(plain_unit(), jdk_slice());
    host.runtime().add_member(
        "app.Plain",
        MemberDecl::method("run", "void", Vec::<&str>::new())
            .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC),
    );

    let results = resolve(&host, "app.Plain", "run");
    let runs: Vec<_> = results.named("run").collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs.iter().filter(|c| c.is_static()).count(), 1);
    assert!(results.contains_key(&no_args("run")));
}

#[test]
fn test_field_and_method_with_same_name_both_kept() {
    let host = analysis_host(plain_unit(), jdk_slice());
    host.runtime()
        .add_member("app.Plain", MemberDecl::field("run", "java.lang.Runnable"));

    let results = resolve(&host, "app.Plain", "run");
    assert!(results.contains_key(&SignatureKey::field("run")));
    assert!(results.contains_key(&no_args("run")));
    assert_eq!(
        results.get(&SignatureKey::field("run")).unwrap().kind(),
        MemberKind::Field
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let first = resolve(&host, "app.Derived", "");
    let second = resolve(&host, "app.Derived", "");
    assert_eq!(first, second);
}

// =============================================================================
// RUNTIME SOURCE
// =============================================================================

#[test]
fn test_runtime_members_are_offered() {
    let host = analysis_host(plain_unit(), jdk_slice());
    host.runtime().add_member(
        "java.lang.String",
        MemberDecl::method("shout", "java.lang.String", Vec::<&str>::new()),
    );

    let results = resolve(&host, "java.lang.String", "sh");
    let shout = results.get(&no_args("shout")).unwrap();
    assert!(shout.modifiers().contains(Modifiers::SYNTHETIC));
}

#[test]
fn test_transient_metaclasses_are_released() {
    let host = analysis_host(collection_unit(), jdk_slice());
    host.runtime().add_member(
        "java.lang.String",
        MemberDecl::method("shout", "java.lang.String", Vec::<&str>::new()),
    );

    resolve(&host, "app.Derived", "");
    resolve(&host, "java.lang.Integer", "");

    assert_eq!(host.runtime().registration_count(), 1);
    assert!(host.runtime().is_registered("java.lang.String"));
    assert!(!host.runtime().is_registered("app.Derived"));
    assert!(!host.runtime().is_registered("java.lang.Object"));
}

#[test]
fn test_failing_runtime_does_not_abort_resolution() {
    let classes = jdk_slice();
    let engine = engine_with(
        plain_unit(),
        classes.clone(),
        Arc::new(classes),
        Arc::new(BrokenRuntime),
        CompletionConfig::default(),
    );

    let results = engine.resolve(&ResolveRequest::new("app.Plain"), &CancellationToken::new());
    assert!(results.contains_key(&no_args("run")));
    assert!(results.contains_key(&no_args("hashCode")));
}

#[test]
fn test_concurrent_resolution_shares_runtime() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let analysis = host.analysis();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..3 {
                    let results = analysis.resolve(
                        &ResolveRequest::new("app.Derived"),
                        &CancellationToken::new(),
                    );
                    assert!(results.contains_key(&no_args("size")));
                }
            });
        }
    });

    assert_eq!(host.runtime().registration_count(), 0);
}

// =============================================================================
// TIMEOUTS AND CANCELLATION
// =============================================================================

#[test]
fn test_slow_host_model_times_out() {
    let config = CompletionConfig::default()
        .with_host_timeout(Duration::from_millis(30), Duration::from_millis(5));
    let engine = engine_with(
        plain_unit(),
        jdk_slice(),
        Arc::new(SlowModel(Duration::from_millis(400))),
        Arc::new(ExpandoRegistry::new()),
        config,
    );

    let started = Instant::now();
    let results = engine.resolve(&ResolveRequest::new("app.Plain"), &CancellationToken::new());

    assert!(started.elapsed() < Duration::from_millis(400));
    assert_eq!(names(&results), vec!["run"]);
}

#[test]
fn test_hanging_type_does_not_starve_later_types() {
    let classes = jdk_slice()
        .with(
            TypeDecl::class("lib.Slow")
                .member(MemberDecl::method("slowOne", "void", Vec::<&str>::new())),
        )
        .with(
            TypeDecl::interface("lib.Fast")
                .member(MemberDecl::method("fastOne", "void", Vec::<&str>::new())),
        );
    let unit = SourceUnit::new()
        .with_package("app")
        .with_type(TypeDecl::class("app.D").extends("lib.Slow").implements("lib.Fast"));
    let model = HangsOn {
        index: classes.clone(),
        slow: "lib.Slow",
        delay: Duration::from_millis(400),
    };
    let config = CompletionConfig::default()
        .with_host_timeout(Duration::from_millis(50), Duration::from_millis(5));
    let engine = engine_with(
        unit,
        classes,
        Arc::new(model),
        Arc::new(ExpandoRegistry::new()),
        config,
    );

    let results = engine.resolve(&ResolveRequest::new("app.D"), &CancellationToken::new());

    assert!(!results.contains_key(&no_args("slowOne")));
    let fast = results.get(&no_args("fastOne")).expect("lib.Fast answers despite lib.Slow hanging");
    assert_eq!(fast.declaring_type(), "lib.Fast");
    assert!(results.contains_key(&no_args("hashCode")));
}

#[test]
fn test_host_budget_bounds_the_whole_walk() {
    let config = CompletionConfig::default()
        .with_host_timeout(Duration::from_millis(60), Duration::from_millis(5))
        .with_host_budget(Duration::from_millis(100));
    let engine = engine_with(
        collection_unit(),
        jdk_slice(),
        Arc::new(SlowModel(Duration::from_millis(400))),
        Arc::new(ExpandoRegistry::new()),
        config,
    );

    // Six types in the walk; one full timeout each would take 360 ms.
    let started = Instant::now();
    let results = engine.resolve(&ResolveRequest::new("app.Derived"), &CancellationToken::new());

    assert!(started.elapsed() < Duration::from_millis(300));
    assert!(results.contains_key(&no_args("own")));
    assert!(results.contains_key(&no_args("describe")));
}

#[test]
fn test_cancellation_returns_partial_result() {
    let token = CancellationToken::new();
    let classes = jdk_slice();
    let model = CancellingModel {
        index: classes.clone(),
        trigger: "app.Base",
        token: token.clone(),
    };
    let engine = engine_with(
        collection_unit(),
        classes,
        Arc::new(model),
        Arc::new(ExpandoRegistry::new()),
        CompletionConfig::default(),
    );

    let results = engine.resolve(&ResolveRequest::new("app.Derived"), &token);

    assert!(results.contains_key(&no_args("own")));
    assert!(results.contains_key(&no_args("describe")));
    // Base's own size() came from source before the host lookup cancelled;
    // the walk never reached Set.
    assert_eq!(results.get(&no_args("size")).unwrap().declaring_type(), "app.Base");
    assert!(!results.contains_key(&no_args("hashCode")));
}

#[test]
fn test_cancelled_token_yields_empty_result() {
    let host = analysis_host(collection_unit(), jdk_slice());
    let token = CancellationToken::new();
    token.cancel();

    let results = host
        .analysis()
        .resolve(&ResolveRequest::new("app.Derived"), &token);
    assert!(results.is_empty());
}
