//! Glob interpretation of rule patterns.
//!
//! - A leading `/` anchors the pattern to the source root. Otherwise the
//!   pattern may match at any directory depth, which is expressed by
//!   implicitly prefixing `**/`.
//! - A trailing `/` restricts the pattern to directory entries. It never
//!   extends the match to the directory's contents.
//! - `*` stops at `/`; `**` spans any number of segments.

use globset::{GlobBuilder, GlobMatcher};

use crate::{FilterError, PathEntry};

/// Outcome of testing a [`PathEntry`] against one [`Pattern`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PatternMatch {
    /// Whether the pattern matched the entry.
    pub matched: bool,
    /// Whether traversal should continue below the entry.
    ///
    /// Always `true` for directories: a directory's own decision never hides
    /// deeper paths from later rules.
    pub descend: bool,
}

/// Compiled form of a rule pattern.
#[derive(Clone, Debug)]
pub struct Pattern {
    text: String,
    anchored: bool,
    directory_only: bool,
    matcher: GlobMatcher,
}

impl Pattern {
    /// Compiles `text` using manifest glob semantics.
    ///
    /// # Examples
    ///
    /// ```
    /// use filters::{PathEntry, Pattern};
    ///
    /// let pattern = Pattern::new("*.md").unwrap();
    /// assert!(pattern.matches(&PathEntry::file("README.md")));
    /// assert!(pattern.matches(&PathEntry::file("docs/guide.md")));
    ///
    /// let anchored = Pattern::new("/README.md").unwrap();
    /// assert!(!anchored.matches(&PathEntry::file("docs/README.md")));
    /// ```
    pub fn new(text: &str) -> Result<Self, FilterError> {
        let (anchored, rest) = match text.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (directory_only, body) = match rest.strip_suffix('/') {
            Some(body) => (true, body),
            None => (false, rest),
        };
        if body.is_empty() {
            return Err(FilterError::Empty {
                pattern: text.to_owned(),
            });
        }

        let glob = if anchored || body == "**" || body.starts_with("**/") {
            body.to_owned()
        } else {
            format!("**/{body}")
        };

        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| FilterError::Glob {
                pattern: text.to_owned(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            text: text.to_owned(),
            anchored,
            directory_only,
            matcher,
        })
    }

    /// Returns the pattern text as written in the manifest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Reports whether the pattern is anchored to the source root.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Reports whether the pattern only matches directories.
    #[must_use]
    pub const fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// Tests `entry` against the pattern.
    #[must_use]
    pub fn matches(&self, entry: &PathEntry) -> bool {
        if self.directory_only && !entry.is_dir() {
            return false;
        }
        self.matcher.is_match(entry.relative_path())
    }

    /// Tests `entry` and reports the traversal hint alongside the match.
    #[must_use]
    pub fn evaluate(&self, entry: &PathEntry) -> PatternMatch {
        PatternMatch {
            matched: self.matches(entry),
            descend: entry.is_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> Pattern {
        Pattern::new(text).expect("pattern compiles")
    }

    #[test]
    fn double_star_extension_matches_every_depth() {
        let p = pattern("**/*.md");
        assert!(p.matches(&PathEntry::file("README.md")));
        assert!(p.matches(&PathEntry::file("docs/guide.md")));
        assert!(p.matches(&PathEntry::file("a/b/c/notes.md")));
        assert!(!p.matches(&PathEntry::file("docs/guide.txt")));
    }

    #[test]
    fn unanchored_pattern_matches_at_any_depth() {
        let p = pattern("*.md");
        assert!(p.matches(&PathEntry::file("README.md")));
        assert!(p.matches(&PathEntry::file("docs/guide.md")));
    }

    #[test]
    fn anchored_pattern_matches_only_root_level() {
        let p = pattern("/README.md");
        assert!(p.matches(&PathEntry::file("README.md")));
        assert!(!p.matches(&PathEntry::file("docs/README.md")));
    }

    #[test]
    fn single_star_does_not_cross_separator() {
        let p = pattern("/src/*.rs");
        assert!(p.matches(&PathEntry::file("src/lib.rs")));
        assert!(!p.matches(&PathEntry::file("src/bin/main.rs")));
    }

    #[test]
    fn anchored_double_star_covers_subtree() {
        let p = pattern("/src/**");
        assert!(p.matches(&PathEntry::file("src/app/app.go")));
        assert!(p.matches(&PathEntry::directory("src/app")));
        assert!(!p.matches(&PathEntry::file("docs/src/x")));
    }

    #[test]
    fn unanchored_multi_segment_pattern_matches_suffix() {
        let p = pattern("app/*.go");
        assert!(p.matches(&PathEntry::file("app/main.go")));
        assert!(p.matches(&PathEntry::file("src/app/main.go")));
        assert!(!p.matches(&PathEntry::file("src/myapp/main.go")));
    }

    #[test]
    fn directory_only_pattern_ignores_files() {
        let p = pattern("build/");
        assert!(p.matches(&PathEntry::directory("build")));
        assert!(p.matches(&PathEntry::directory("nested/build")));
        assert!(!p.matches(&PathEntry::file("build")));
        assert!(!p.matches(&PathEntry::file("build/output.bin")));
    }

    #[test]
    fn double_star_directory_pattern_matches_every_directory() {
        let p = pattern("**/");
        assert!(p.matches(&PathEntry::directory("docs")));
        assert!(p.matches(&PathEntry::directory("src/app")));
        assert!(!p.matches(&PathEntry::file("README.md")));
    }

    #[test]
    fn bare_double_star_matches_everything() {
        let p = pattern("**");
        assert!(p.matches(&PathEntry::file("main.go")));
        assert!(p.matches(&PathEntry::file("src/app/app.go")));
        assert!(p.matches(&PathEntry::directory("src")));
    }

    #[test]
    fn star_matches_everything_at_any_depth() {
        let p = pattern("*");
        assert!(p.matches(&PathEntry::file("common.txt")));
        assert!(p.matches(&PathEntry::file("docs/trace.log")));
        assert!(p.matches(&PathEntry::directory("src")));
    }

    #[test]
    fn escaped_metacharacters_match_literally() {
        let p = pattern("foo\\?bar");
        assert!(p.matches(&PathEntry::file("foo?bar")));
        assert!(!p.matches(&PathEntry::file("fooXbar")));
    }

    #[test]
    fn evaluate_reports_descend_hint_for_directories_only() {
        let p = pattern("/docs/");
        let dir = p.evaluate(&PathEntry::directory("docs"));
        assert!(dir.matched);
        assert!(dir.descend);

        let file = p.evaluate(&PathEntry::file("docs"));
        assert!(!file.matched);
        assert!(!file.descend);
    }

    #[test]
    fn excluded_directory_still_descends() {
        let p = pattern("ignored");
        let outcome = p.evaluate(&PathEntry::directory("ignored"));
        assert!(outcome.matched);
        assert!(outcome.descend);
    }

    #[test]
    fn empty_patterns_are_rejected() {
        for text in ["/", "//"] {
            let error = Pattern::new(text).unwrap_err();
            assert!(matches!(error, FilterError::Empty { .. }), "{text}");
            assert_eq!(error.pattern(), text);
        }
    }

    #[test]
    fn invalid_glob_reports_error() {
        let error = Pattern::new("[").unwrap_err();
        assert!(matches!(error, FilterError::Glob { .. }));
        assert_eq!(error.pattern(), "[");
    }

    #[test]
    fn markers_are_reported() {
        let p = pattern("/docs/");
        assert!(p.is_anchored());
        assert!(p.is_directory_only());
        assert_eq!(p.as_str(), "/docs/");
    }
}
