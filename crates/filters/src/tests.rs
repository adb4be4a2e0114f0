use super::*;
use std::path::{Path, PathBuf};

#[test]
fn empty_rules_exclude_everything() {
    let set = FilterSet::from_rules(Vec::new()).expect("empty set");
    assert!(!set.allows(Path::new("foo"), false));
    assert!(!set.allows(Path::new("foo"), true));
}

#[test]
fn include_rule_allows_path() {
    let set = FilterSet::from_rules([FilterRule::include("foo")]).expect("compiled");
    assert!(set.allows(Path::new("foo"), false));
    assert!(set.allows(Path::new("bar/foo"), false));
    assert!(!set.allows(Path::new("bar"), false));
}

#[test]
fn exclude_rule_blocks_match() {
    let rules = [FilterRule::exclude("foo"), FilterRule::include("**")];
    let set = FilterSet::from_rules(rules).expect("compiled");
    assert!(!set.allows(Path::new("foo"), false));
    assert!(!set.allows(Path::new("bar/foo"), false));
    assert!(set.allows(Path::new("bar"), false));
}

#[test]
fn excluded_directory_does_not_hide_deeper_include() {
    let rules = [
        FilterRule::exclude("/docs/"),
        FilterRule::include("/docs/api/*.md"),
    ];
    let set = FilterSet::from_rules(rules).expect("compiled");
    assert!(!set.allows(Path::new("docs"), true));
    assert!(set.allows(Path::new("docs/api/index.md"), false));
    assert!(!set.allows(Path::new("docs/guide.md"), false));
}

#[test]
fn included_directory_does_not_select_contents() {
    let rules = [FilterRule::include("/docs/"), FilterRule::exclude("*")];
    let set = FilterSet::from_rules(rules).expect("compiled");
    assert!(set.allows(Path::new("docs"), true));
    assert!(!set.allows(Path::new("docs/guide.md"), false));
}

#[test]
fn directory_include_then_file_exclude_are_independent() {
    let rules = [
        FilterRule::include("/docs/"),
        FilterRule::exclude("/docs/guide.md"),
        FilterRule::include("/docs/**"),
    ];
    let set = FilterSet::from_rules(rules).expect("compiled");
    assert!(set.allows(Path::new("docs"), true));
    assert!(!set.allows(Path::new("docs/guide.md"), false));
    assert!(set.allows(Path::new("docs/api.md"), false));
}

#[test]
fn anchored_pattern_matches_only_at_root() {
    let set = FilterSet::from_rules([FilterRule::include("/foo/bar")]).expect("compiled");
    assert!(set.allows(Path::new("foo/bar"), false));
    assert!(!set.allows(Path::new("a/foo/bar"), false));
}

#[test]
fn wildcard_patterns_match_expected_paths() {
    let set = FilterSet::from_rules([FilterRule::include("*.tmp")]).expect("compiled");
    assert!(set.allows(Path::new("note.tmp"), false));
    assert!(set.allows(Path::new("dir/note.tmp"), false));
    assert!(!set.allows(Path::new("note.txt"), false));
}

#[test]
fn invalid_pattern_reports_error() {
    let error = FilterSet::from_rules([FilterRule::exclude("[")]).expect_err("invalid");
    assert_eq!(error.pattern(), "[");
}

#[test]
fn glob_escape_sequences_supported() {
    let set = FilterSet::from_rules([FilterRule::include("foo\\?bar")]).expect("compiled");
    assert!(set.allows(Path::new("foo?bar"), false));
    assert!(!set.allows(Path::new("fooXbar"), false));
}

#[test]
fn ordering_respected() {
    let rules = [
        FilterRule::include("special.tmp"),
        FilterRule::exclude("*.tmp"),
        FilterRule::include("**"),
    ];
    let set = FilterSet::from_rules(rules).expect("compiled");
    assert!(set.allows(Path::new("special.tmp"), false));
    assert!(!set.allows(Path::new("other.tmp"), false));
    assert!(set.allows(Path::new("other.txt"), false));
}

#[test]
fn allows_checks_respect_directory_flag() {
    let set = FilterSet::from_rules([FilterRule::include("foo/")]).expect("compiled");
    assert!(set.allows(Path::new("foo"), true));
    assert!(!set.allows(Path::new("foo"), false));
}

#[test]
fn relative_path_conversion_skips_current_dir_components() {
    let set = FilterSet::from_rules([FilterRule::include("/foo/bar")]).expect("compiled");
    let mut path = PathBuf::from(".");
    path.push("foo");
    path.push(".");
    path.push("bar");
    assert!(set.allows(&path, false));
}

#[test]
fn self_excluding_manifest() {
    let loader = MemoryLoader::new().with_file("/src/m.txt", "+ /file.txt\n- /m.txt\n");
    let set = FilterSet::from_manifest(Path::new("/src/m.txt"), &loader).expect("resolves");
    assert!(set.allows(Path::new("file.txt"), false));
    assert!(!set.allows(Path::new("m.txt"), false));
}

#[test]
fn manifest_cycle_is_reported_through_filter_set() {
    let loader = MemoryLoader::new()
        .with_file("/m/a", ". b\n")
        .with_file("/m/b", ". a\n");
    let error = FilterSet::from_manifest(Path::new("/m/a"), &loader).expect_err("cycle");
    assert!(matches!(
        error,
        ManifestError::Resolve(ResolveError::Cycle { .. })
    ));
}

#[test]
fn manifest_parse_error_is_reported_through_filter_set() {
    let loader = MemoryLoader::new().with_file("/m/a", "+ ok\n* nope\n");
    let error = FilterSet::from_manifest(Path::new("/m/a"), &loader).expect_err("parse");
    assert_eq!(error.to_string(), "/m/a:2: unrecognised rule '* nope'");
}

#[test]
fn rule_origins_survive_compilation() {
    let loader = MemoryLoader::new()
        .with_file("/m/base", "# base\n- *.log\n")
        .with_file("/m/top", ". base\n+ **\n");
    let set = FilterSet::from_manifest(Path::new("/m/top"), &loader).expect("resolves");
    let rule = set
        .matching_rule(&PathEntry::file("server.log"))
        .expect("matched");
    let origin = rule.origin().expect("origin");
    assert_eq!(origin.file(), Path::new("/m/base"));
    assert_eq!(origin.line(), 2);
}

#[test]
fn pattern_evaluate_always_descends_into_directories() {
    let set = FilterSet::from_rules([FilterRule::exclude("**")]).expect("compiled");
    let entry = PathEntry::directory("vendor");
    assert!(!set.allows_entry(&entry));
    let outcome = Pattern::new("**").expect("compiled").evaluate(&entry);
    assert!(outcome.matched);
    assert!(outcome.descend);
}

mod property {
    use super::*;
    use proptest::prelude::*;

    fn pattern_segment() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("a"),
            Just("b"),
            Just("*"),
            Just("**"),
            Just("c.txt"),
            Just("*.md"),
        ]
    }

    /// Patterns built from well-formed segments, optionally anchored and/or
    /// directory-only.
    fn valid_pattern() -> impl Strategy<Value = String> {
        (
            any::<bool>(),
            proptest::collection::vec(pattern_segment(), 1..4),
            any::<bool>(),
        )
            .prop_map(|(anchored, segments, dir_only)| {
                let mut text = String::new();
                if anchored {
                    text.push('/');
                }
                text.push_str(&segments.join("/"));
                if dir_only {
                    text.push('/');
                }
                text
            })
    }

    fn valid_rule() -> impl Strategy<Value = FilterRule> {
        (any::<bool>(), valid_pattern()).prop_map(|(include, pattern)| {
            if include {
                FilterRule::include(pattern)
            } else {
                FilterRule::exclude(pattern)
            }
        })
    }

    fn path_entry() -> impl Strategy<Value = PathEntry> {
        (
            proptest::collection::vec(
                prop_oneof![Just("a"), Just("b"), Just("c.txt"), Just("d.md")],
                1..5,
            ),
            any::<bool>(),
        )
            .prop_map(|(segments, is_dir)| PathEntry::new(segments.join("/"), is_dir))
    }

    proptest! {
        #[test]
        fn decisions_are_deterministic(
            rules in proptest::collection::vec(valid_rule(), 0..8),
            entry in path_entry(),
        ) {
            let set = FilterSet::from_rules(rules.clone()).expect("compiled");
            let again = FilterSet::from_rules(rules).expect("compiled");
            prop_assert_eq!(set.decide(&entry), set.decide(&entry));
            prop_assert_eq!(set.decide(&entry), again.decide(&entry));
        }

        #[test]
        fn first_matching_rule_decides(
            rules in proptest::collection::vec(valid_rule(), 0..8),
            entry in path_entry(),
        ) {
            let set = FilterSet::from_rules(rules.clone()).expect("compiled");
            let expected = rules.iter().position(|rule| {
                Pattern::new(rule.pattern()).expect("compiled").matches(&entry)
            });
            let decision = set.decide(&entry);

            prop_assert_eq!(decision.rule_index(), expected);
            let included = expected
                .map(|index| rules[index].action() == FilterAction::Include)
                .unwrap_or(false);
            prop_assert_eq!(decision.is_included(), included);
        }

        #[test]
        fn leading_catch_all_exclude_shadows_everything(
            rules in proptest::collection::vec(valid_rule(), 0..8),
            entry in path_entry(),
        ) {
            let mut all = vec![FilterRule::exclude("**")];
            all.extend(rules);
            let set = FilterSet::from_rules(all).expect("compiled");
            prop_assert!(!set.allows_entry(&entry));
            prop_assert_eq!(set.decide(&entry).rule_index(), Some(0));
        }

        #[test]
        fn deduplication_does_not_change_decisions(
            rules in proptest::collection::vec(valid_rule(), 1..6),
            entry in path_entry(),
        ) {
            let set = FilterSet::from_rules(rules.clone()).expect("compiled");
            let mut doubled = rules.clone();
            doubled.extend(rules);
            let doubled = FilterSet::from_rules(doubled).expect("compiled");

            prop_assert!(doubled.pattern_count() <= set.len());
            prop_assert_eq!(set.decide(&entry), doubled.decide(&entry));
        }
    }
}
