#![no_main]

use arbitrary::Arbitrary;
use filters::{FilterRule, FilterSet, PathEntry};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    rules: Vec<(bool, String)>,
    path: String,
    is_dir: bool,
}

fuzz_target!(|input: Input| {
    let rules = input.rules.into_iter().map(|(include, pattern)| {
        if include {
            FilterRule::include(pattern)
        } else {
            FilterRule::exclude(pattern)
        }
    });
    let Ok(set) = FilterSet::from_rules(rules) else {
        return;
    };
    let entry = PathEntry::new(input.path, input.is_dir);
    let first = set.decide(&entry);
    assert_eq!(first, set.decide(&entry));
    if let Some(index) = first.rule_index() {
        assert!(index < set.len());
    }
});
