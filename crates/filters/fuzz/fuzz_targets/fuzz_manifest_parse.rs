#![no_main]

use filters::{FilterSet, ManifestItem, parse_manifest};
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|text: &str| {
    let Ok(items) = parse_manifest(text, Path::new("fuzz.manifest")) else {
        return;
    };
    let rules = items.into_iter().filter_map(|item| match item {
        ManifestItem::Rule(rule) => Some(rule),
        ManifestItem::Inherit(_) => None,
    });
    let _ = FilterSet::from_rules(rules);
});
