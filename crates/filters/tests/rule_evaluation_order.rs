//! Tests for manifest rule evaluation order.
//!
//! Rules are evaluated in flattened declaration order and the first rule
//! whose pattern matches decides. Specificity plays no part. An entry that no
//! rule matches is excluded.

use filters::{Decision, FilterRule, FilterSet, PathEntry};
use std::path::Path;

// =============================================================================
// First-Match-Wins Fundamental Behavior
// =============================================================================

#[test]
fn specific_include_before_catch_all_exclude() {
    let set = FilterSet::from_rules([FilterRule::include("/a.txt"), FilterRule::exclude("*")])
        .unwrap();
    assert!(set.allows(Path::new("a.txt"), false));
    assert!(!set.allows(Path::new("b.txt"), false));
}

#[test]
fn catch_all_exclude_before_specific_include() {
    let set = FilterSet::from_rules([FilterRule::exclude("*"), FilterRule::include("/a.txt")])
        .unwrap();
    assert!(!set.allows(Path::new("a.txt"), false));
}

#[test]
fn general_include_before_specific_exclude() {
    let rules = [
        FilterRule::include("*.txt"),
        FilterRule::exclude("secret.txt"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();
    // The include matches first, so the later exclude never applies.
    assert!(set.allows(Path::new("secret.txt"), false));
}

#[test]
fn deciding_rule_index_is_reported() {
    let rules = [
        FilterRule::exclude("*.log"),
        FilterRule::include("/src/**"),
        FilterRule::exclude("*"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    let cases = [
        ("src/debug.log", Some(0), Decision::Excluded),
        ("src/main.go", Some(1), Decision::Included),
        ("README.md", Some(2), Decision::Excluded),
    ];
    for (path, index, decision) in cases {
        let outcome = set.decide(&PathEntry::file(path));
        assert_eq!(outcome.rule_index(), index, "{path}");
        assert_eq!(outcome.decision(), decision, "{path}");
    }
}

// =============================================================================
// Deny By Default
// =============================================================================

#[test]
fn no_rule_matching_excludes() {
    let set = FilterSet::from_rules([FilterRule::include("*.go")]).unwrap();
    let outcome = set.decide(&PathEntry::file("notes.md"));
    assert!(outcome.is_default());
    assert_eq!(outcome.decision(), Decision::Excluded);
}

#[test]
fn exclude_only_rules_still_exclude_unmatched_paths() {
    let set = FilterSet::from_rules([FilterRule::exclude("*.tmp")]).unwrap();
    assert!(!set.allows(Path::new("kept.txt"), false));
}

#[test]
fn directories_also_default_to_excluded() {
    let set = FilterSet::from_rules([FilterRule::include("*.go")]).unwrap();
    assert!(!set.allows(Path::new("src"), true));
}

// =============================================================================
// Source Tool Scenarios
// =============================================================================

#[test]
fn rule_precedence_scenario() {
    let rules = [
        FilterRule::include("/docs/"),
        FilterRule::exclude("/docs/guide.md"),
        FilterRule::include("/docs/**"),
        FilterRule::exclude("*"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("docs"), true));
    assert!(!set.allows(Path::new("docs/guide.md"), false));
    assert!(set.allows(Path::new("docs/api.md"), false));
    assert!(!set.allows(Path::new("main.go"), false));
}

#[test]
fn wildcard_exclusion_scenario() {
    let rules = [
        FilterRule::exclude("*.log"),
        FilterRule::include("**"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(!set.allows(Path::new("trace.log"), false));
    assert!(!set.allows(Path::new("docs/trace.log"), false));
    assert!(set.allows(Path::new("main.go"), false));
    assert!(set.allows(Path::new("docs"), true));
}

#[test]
fn self_exclusion_scenario() {
    let rules = [FilterRule::include("/file.txt"), FilterRule::exclude("/m.txt")];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("file.txt"), false));
    assert!(!set.allows(Path::new("m.txt"), false));
}
