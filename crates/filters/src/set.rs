use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::decision::{CompiledRule, FilterSetInner};
use crate::merge::{ManifestCache, ManifestLoader, resolve_manifest_with_cache};
use crate::{FilterDecision, FilterError, FilterRule, ManifestError, PathEntry, Pattern};

/// Compiled, immutable flattened rule list.
///
/// A `FilterSet` is built from rules in declaration order via
/// [`from_rules`](Self::from_rules) or directly from a manifest via
/// [`from_manifest`](Self::from_manifest). Each distinct pattern text is
/// compiled once and shared by every rule that spells it the same way.
///
/// Evaluation is first-match-wins: the earliest rule whose pattern matches an
/// entry decides it. Entries matched by no rule are excluded.
///
/// `FilterSet` is cheaply cloneable (the inner state is behind an [`Arc`]) and
/// can be shared across threads.
///
/// # Examples
///
/// ```
/// use filters::{FilterRule, FilterSet};
/// use std::path::Path;
///
/// let set = FilterSet::from_rules([
///     FilterRule::include("/a.txt"),
///     FilterRule::exclude("*"),
/// ]).unwrap();
/// assert!(set.allows(Path::new("a.txt"), false));
///
/// // Order, not specificity, decides.
/// let set = FilterSet::from_rules([
///     FilterRule::exclude("*"),
///     FilterRule::include("/a.txt"),
/// ]).unwrap();
/// assert!(!set.allows(Path::new("a.txt"), false));
///
/// // Nothing matches: excluded.
/// assert!(!FilterSet::default().allows(Path::new("README.md"), false));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    inner: Arc<FilterSetInner>,
}

impl FilterSet {
    /// Compiles `rules`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for the first pattern that fails to compile.
    pub fn from_rules<I>(rules: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let mut inner = FilterSetInner::default();
        let mut by_text: FxHashMap<String, usize> = FxHashMap::default();

        for rule in rules {
            let pattern = match by_text.get(rule.pattern()) {
                Some(&index) => index,
                None => {
                    let index = inner.patterns.len();
                    inner.patterns.push(Pattern::new(rule.pattern())?);
                    by_text.insert(rule.pattern().to_owned(), index);
                    index
                }
            };
            inner.rules.push(CompiledRule { rule, pattern });
        }

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Resolves the manifest at `path` with `loader` and compiles the result.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Resolve`] when loading, parsing or inheritance
    /// expansion fails and [`ManifestError::Filter`] when a pattern is invalid.
    pub fn from_manifest<L>(path: &Path, loader: &L) -> Result<Self, ManifestError>
    where
        L: ManifestLoader + ?Sized,
    {
        let mut cache = ManifestCache::new();
        Self::from_manifest_with_cache(path, loader, &mut cache)
    }

    /// Same as [`from_manifest`](Self::from_manifest) but shares `cache`
    /// with other resolutions.
    pub fn from_manifest_with_cache<L>(
        path: &Path,
        loader: &L,
        cache: &mut ManifestCache,
    ) -> Result<Self, ManifestError>
    where
        L: ManifestLoader + ?Sized,
    {
        let rules = resolve_manifest_with_cache(path, loader, cache)?;
        Ok(Self::from_rules(rules)?)
    }

    /// Decides `entry` against the flattened rule list.
    #[must_use]
    pub fn decide(&self, entry: &PathEntry) -> FilterDecision {
        self.inner.decision(entry)
    }

    /// Returns `true` if the entry is selected.
    #[must_use]
    pub fn allows_entry(&self, entry: &PathEntry) -> bool {
        self.decide(entry).is_included()
    }

    /// Returns `true` if the native relative `path` is selected.
    ///
    /// `is_dir` must be `true` for directories so that directory-only
    /// patterns (trailing `/`) can match.
    #[must_use]
    pub fn allows(&self, path: &Path, is_dir: bool) -> bool {
        self.allows_entry(&PathEntry::from_path(path, is_dir))
    }

    /// Returns the rule deciding `entry`, or `None` under the default exclusion.
    #[must_use]
    pub fn matching_rule(&self, entry: &PathEntry) -> Option<&FilterRule> {
        self.decide(entry)
            .rule_index()
            .map(|index| &self.inner.rules[index].rule)
    }

    /// Iterates over the flattened rules in evaluation order.
    pub fn rules(&self) -> impl ExactSizeIterator<Item = &FilterRule> + '_ {
        self.inner.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.rules.len()
    }

    /// Returns `true` if the set has no rules and therefore excludes everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.rules.is_empty()
    }

    /// Number of distinct compiled patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.inner.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decision, MemoryLoader};

    #[test]
    fn filter_set_default_is_empty() {
        let set = FilterSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn empty_set_excludes_everything() {
        let set = FilterSet::from_rules(vec![]).unwrap();
        assert!(!set.allows(Path::new("file.txt"), false));
        assert!(!set.allows(Path::new("docs"), true));
    }

    #[test]
    fn first_matching_include_wins() {
        let set = FilterSet::from_rules([FilterRule::include("/a.txt"), FilterRule::exclude("*")])
            .unwrap();
        let decision = set.decide(&PathEntry::file("a.txt"));
        assert_eq!(decision.decision(), Decision::Included);
        assert_eq!(decision.rule_index(), Some(0));
    }

    #[test]
    fn earlier_general_exclude_beats_later_specific_include() {
        let set = FilterSet::from_rules([FilterRule::exclude("*"), FilterRule::include("/a.txt")])
            .unwrap();
        let decision = set.decide(&PathEntry::file("a.txt"));
        assert_eq!(decision.decision(), Decision::Excluded);
        assert_eq!(decision.rule_index(), Some(0));
    }

    #[test]
    fn unmatched_entries_are_excluded_by_default() {
        let set = FilterSet::from_rules([FilterRule::include("*.rs")]).unwrap();
        let decision = set.decide(&PathEntry::file("README.md"));
        assert!(decision.is_default());
        assert!(!decision.is_included());
        assert!(set.matching_rule(&PathEntry::file("README.md")).is_none());
    }

    #[test]
    fn matching_rule_reports_deciding_rule() {
        let set = FilterSet::from_rules([
            FilterRule::exclude("*.log"),
            FilterRule::include("**"),
        ])
        .unwrap();
        let rule = set.matching_rule(&PathEntry::file("logs/app.log")).unwrap();
        assert_eq!(rule, &FilterRule::exclude("*.log"));
    }

    #[test]
    fn identical_patterns_share_one_matcher() {
        let set = FilterSet::from_rules([
            FilterRule::include("*.md"),
            FilterRule::exclude("/docs/"),
            FilterRule::exclude("*.md"),
        ])
        .unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.pattern_count(), 2);
        assert!(set.allows(Path::new("docs/guide.md"), false));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let error = FilterSet::from_rules([FilterRule::include("ok"), FilterRule::exclude("[")])
            .unwrap_err();
        assert_eq!(error.pattern(), "[");
    }

    #[test]
    fn allows_converts_native_paths() {
        let set = FilterSet::from_rules([FilterRule::include("/src/app/*.go")]).unwrap();
        let path: std::path::PathBuf = ["src", "app", "app.go"].iter().collect();
        assert!(set.allows(&path, false));
    }

    #[test]
    fn from_manifest_compiles_flattened_rules() {
        let loader = MemoryLoader::new()
            .with_file("/m/base", "+ /y\n")
            .with_file("/m/child", ". base\n+ /x\n- *\n");
        let set = FilterSet::from_manifest(Path::new("/m/child"), &loader).unwrap();
        let rendered: Vec<String> = set.rules().map(ToString::to_string).collect();
        assert_eq!(rendered, ["+ /y", "+ /x", "- *"]);
        assert!(set.allows(Path::new("y"), false));
        assert!(!set.allows(Path::new("z"), false));
    }

    #[test]
    fn from_manifest_reports_bad_pattern() {
        let loader = MemoryLoader::new().with_file("/m/bad", "+ [\n");
        let error = FilterSet::from_manifest(Path::new("/m/bad"), &loader).unwrap_err();
        assert!(matches!(error, ManifestError::Filter(_)));
    }

    #[test]
    fn clones_share_rules() {
        let set = FilterSet::from_rules([FilterRule::include("**")]).unwrap();
        let clone = set.clone();
        assert!(Arc::ptr_eq(&set.inner, &clone.inner));
    }
}
