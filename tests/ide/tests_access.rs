//! Access filtering tests.

use gcomplete::ide::{AccessContext, CompletionConfig, ResolveRequest};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;

fn account_members(access: AccessContext, config: CompletionConfig) -> Vec<String> {
    let mut host = analysis_host(account_unit(), jdk_slice());
    host.set_config(config);
    let results = host.analysis().resolve(
        &ResolveRequest::new("app.Account").with_access(access),
        &CancellationToken::new(),
    );
    // Drop the root members to keep expectations readable.
    let mut names: Vec<String> = results
        .candidates()
        .filter(|c| !c.is_root_declared())
        .map(|c| c.name().to_string())
        .collect();
    names.sort();
    names
}

#[rstest]
#[case::unrelated(AccessContext::PUBLIC, &["deposit", "open"])]
#[case::subtype(AccessContext::PUBLIC | AccessContext::PROTECTED, &["audit", "deposit", "open"])]
#[case::same_package(
    AccessContext::PUBLIC | AccessContext::PROTECTED | AccessContext::PACKAGE,
    &["audit", "deposit", "internal", "open"]
)]
#[case::same_type(AccessContext::all(), &["audit", "balance", "deposit", "internal", "open"])]
fn test_access_context_filters(#[case] access: AccessContext, #[case] expected: &[&str]) {
    assert_eq!(account_members(access, CompletionConfig::default()), expected);
}

#[test]
fn test_access_filter_disabled() {
    let names = account_members(
        AccessContext::PUBLIC,
        CompletionConfig::default().with_honour_access_modifiers(false),
    );
    assert_eq!(names, vec!["audit", "balance", "deposit", "internal", "open"]);
}

#[rstest]
#[case("app.Account", AccessContext::all())]
#[case("app.Teller", AccessContext::PUBLIC | AccessContext::PROTECTED | AccessContext::PACKAGE)]
#[case("other.Client", AccessContext::PUBLIC)]
fn test_access_for_caller(#[case] caller: &str, #[case] expected: AccessContext) {
    let host = analysis_host(account_unit(), jdk_slice());
    assert_eq!(host.analysis().access_for(caller, "app.Account"), expected);
}

#[test]
fn test_static_only_on_class_reference() {
    let host = analysis_host(account_unit(), jdk_slice());
    let results = host.analysis().resolve(
        &ResolveRequest::new("app.Account")
            .with_static_only(true)
            .with_access(AccessContext::all()),
        &CancellationToken::new(),
    );
    assert_eq!(names(&results), vec!["open"]);
}

#[test]
fn test_static_members_of_library_class() {
    let host = analysis_host(plain_unit(), jdk_slice());
    let results = host.analysis().resolve(
        &ResolveRequest::new("java.lang.Integer").with_static_only(true),
        &CancellationToken::new(),
    );
    assert_eq!(names(&results), vec!["MAX_VALUE", "valueOf"]);
}
