use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::FilterAction;

/// Location a rule was declared at.
///
/// Rules built programmatically carry no origin; rules produced by
/// [`parse_manifest`](crate::parse_manifest) record the manifest path and the
/// 1-based physical line number.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RuleOrigin {
    file: Arc<Path>,
    line: usize,
}

impl RuleOrigin {
    /// Creates an origin for `line` of `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: Arc::from(file.into()),
            line,
        }
    }

    pub(crate) fn shared(file: Arc<Path>, line: usize) -> Self {
        Self { file, line }
    }

    /// Returns the manifest the rule was read from.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the 1-based line number within [`file`](Self::file).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Include or exclude rule consisting of an action and pattern text.
///
/// The pattern is stored verbatim, including a leading `/` anchor and a
/// trailing `/` directory marker. Interpretation happens when the rule is
/// compiled into a [`FilterSet`](crate::FilterSet).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterRule {
    pub(crate) action: FilterAction,
    pub(crate) pattern: String,
    pub(crate) origin: Option<RuleOrigin>,
}

impl FilterRule {
    /// Creates an include rule for `pattern`.
    #[must_use]
    pub fn include(pattern: impl Into<String>) -> Self {
        Self::new(FilterAction::Include, pattern)
    }

    /// Creates an exclude rule for `pattern`.
    #[must_use]
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self::new(FilterAction::Exclude, pattern)
    }

    /// Creates a rule with an explicit action.
    #[must_use]
    pub fn new(action: FilterAction, pattern: impl Into<String>) -> Self {
        Self {
            action,
            pattern: pattern.into(),
            origin: None,
        }
    }

    /// Attaches the manifest location the rule was declared at.
    #[must_use]
    pub fn with_origin(mut self, origin: RuleOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Returns the rule action.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// Returns the pattern text associated with the rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns where the rule was declared, if it came from a manifest.
    #[must_use]
    pub const fn origin(&self) -> Option<&RuleOrigin> {
        self.origin.as_ref()
    }

    /// Reports whether the pattern is anchored to the source root.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.pattern.starts_with('/')
    }

    /// Reports whether the pattern only applies to directories.
    #[must_use]
    pub fn is_directory_only(&self) -> bool {
        self.pattern.len() > 1 && self.pattern.ends_with('/')
    }
}

/// Renders the rule in manifest syntax (`+ pattern` / `- pattern`).
impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action.prefix(), self.pattern)
    }
}
