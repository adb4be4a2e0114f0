//! Integration tests for glob pattern matching.
//!
//! Manifest patterns use `globset` syntax with `/` as a literal separator:
//! `*` and `?` stay inside one segment, `**` spans any number of segments and
//! `[...]` classes behave as in shell globs. Every test starts from an empty
//! (deny-all) baseline and includes what the pattern matches.

use filters::{FilterRule, FilterSet};
use std::path::Path;

fn includes(pattern: &str) -> FilterSet {
    FilterSet::from_rules([FilterRule::include(pattern)]).unwrap()
}

// ============================================================================
// Single Star Wildcard Tests (*)
// ============================================================================

#[test]
fn star_matches_any_filename() {
    let set = includes("file*");

    assert!(set.allows(Path::new("file"), false));
    assert!(set.allows(Path::new("file.txt"), false));
    assert!(set.allows(Path::new("file.tar.gz"), false));
    assert!(!set.allows(Path::new("profile"), false));
}

#[test]
fn star_in_middle() {
    let set = includes("file*.log");

    assert!(set.allows(Path::new("file.log"), false));
    assert!(set.allows(Path::new("file_app.log"), false));
    assert!(!set.allows(Path::new("file.txt"), false));
}

#[test]
fn star_does_not_match_slash() {
    let set = includes("/src/*.go");

    assert!(set.allows(Path::new("src/main.go"), false));
    assert!(!set.allows(Path::new("src/app/app.go"), false));
}

// ============================================================================
// Question Mark Wildcard Tests (?)
// ============================================================================

#[test]
fn question_matches_single_char() {
    let set = includes("file?.txt");

    assert!(set.allows(Path::new("file1.txt"), false));
    assert!(!set.allows(Path::new("file.txt"), false));
    assert!(!set.allows(Path::new("file12.txt"), false));
}

#[test]
fn question_does_not_match_slash() {
    let set = includes("/a?b");

    assert!(set.allows(Path::new("axb"), false));
    assert!(!set.allows(Path::new("a/b"), false));
}

// ============================================================================
// Double Star Wildcard Tests (**)
// ============================================================================

#[test]
fn double_star_extension_matches_root_and_nested() {
    let set = includes("**/*.md");

    assert!(set.allows(Path::new("README.md"), false));
    assert!(set.allows(Path::new("docs/guide.md"), false));
    assert!(!set.allows(Path::new("docs/guide.txt"), false));
}

#[test]
fn unanchored_extension_matches_nested() {
    let set = includes("*.md");

    assert!(set.allows(Path::new("README.md"), false));
    assert!(set.allows(Path::new("docs/guide.md"), false));
}

#[test]
fn double_star_in_middle_matches_zero_or_more_segments() {
    let set = includes("/src/**/test.go");

    assert!(set.allows(Path::new("src/test.go"), false));
    assert!(set.allows(Path::new("src/app/test.go"), false));
    assert!(set.allows(Path::new("src/a/b/c/test.go"), false));
    assert!(!set.allows(Path::new("lib/test.go"), false));
}

#[test]
fn double_star_alone_matches_everything() {
    let set = includes("**");

    assert!(set.allows(Path::new("main.go"), false));
    assert!(set.allows(Path::new("src"), true));
    assert!(set.allows(Path::new("src/app/app.go"), false));
}

#[test]
fn star_alone_matches_everything_unanchored() {
    let set = includes("*");

    assert!(set.allows(Path::new("main.go"), false));
    assert!(set.allows(Path::new("docs/trace.log"), false));
}

// ============================================================================
// Character Class Tests ([])
// ============================================================================

#[test]
fn character_class_basic() {
    let set = includes("file[abc].txt");

    assert!(set.allows(Path::new("filea.txt"), false));
    assert!(set.allows(Path::new("filec.txt"), false));
    assert!(!set.allows(Path::new("filed.txt"), false));
}

#[test]
fn character_class_range() {
    let set = includes("log[0-9].txt");

    assert!(set.allows(Path::new("log0.txt"), false));
    assert!(set.allows(Path::new("log9.txt"), false));
    assert!(!set.allows(Path::new("logx.txt"), false));
}

#[test]
fn character_class_negation() {
    let set = includes("file[!0-9].txt");

    assert!(set.allows(Path::new("filea.txt"), false));
    assert!(!set.allows(Path::new("file1.txt"), false));
}

#[test]
fn unterminated_class_is_rejected() {
    let error = FilterSet::from_rules([FilterRule::include("file[abc")]).unwrap_err();
    assert_eq!(error.pattern(), "file[abc");
}

// ============================================================================
// Escapes
// ============================================================================

#[test]
fn escaped_star_matches_literally() {
    let set = includes("literal\\*name");

    assert!(set.allows(Path::new("literal*name"), false));
    assert!(!set.allows(Path::new("literalXname"), false));
}

// ============================================================================
// Complex Real-World Patterns
// ============================================================================

#[test]
fn go_service_slice() {
    let rules = [
        FilterRule::exclude("*_test.go"),
        FilterRule::include("/cmd/api/**"),
        FilterRule::include("/internal/**/*.go"),
        FilterRule::include("/go.mod"),
        FilterRule::include("/go.sum"),
        FilterRule::exclude("*"),
    ];
    let set = FilterSet::from_rules(rules).unwrap();

    assert!(set.allows(Path::new("cmd/api/main.go"), false));
    assert!(set.allows(Path::new("internal/db/conn.go"), false));
    assert!(set.allows(Path::new("go.mod"), false));
    assert!(!set.allows(Path::new("internal/db/conn_test.go"), false));
    assert!(!set.allows(Path::new("cmd/worker/main.go"), false));
    assert!(!set.allows(Path::new("README.md"), false));
}
