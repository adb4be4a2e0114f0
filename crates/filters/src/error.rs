use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error produced when a rule pattern cannot be compiled into a matcher.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The pattern has nothing left to match once the `/` anchor and
    /// directory markers are removed.
    #[error("filter pattern '{pattern}' is empty")]
    Empty {
        /// Offending pattern text.
        pattern: String,
    },
    /// The glob expression is invalid.
    #[error("failed to compile filter pattern '{pattern}': {source}")]
    Glob {
        /// Offending pattern text.
        pattern: String,
        /// Underlying glob compilation error.
        #[source]
        source: globset::Error,
    },
}

impl FilterError {
    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Empty { pattern } | Self::Glob { pattern, .. } => pattern,
        }
    }
}

/// Why a manifest line was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseErrorReason {
    /// The line does not start with `+`, `-`, `.` or `#`.
    UnknownDirective(String),
    /// The directive character is not followed by whitespace.
    MissingSeparator(char),
    /// The directive has no pattern or path after it.
    MissingArgument(char),
}

impl fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDirective(line) => write!(f, "unrecognised rule '{line}'"),
            Self::MissingSeparator(directive) => {
                write!(f, "expected whitespace after '{directive}'")
            }
            Self::MissingArgument(directive) => {
                write!(f, "'{directive}' requires a pattern or path")
            }
        }
    }
}

/// Malformed line in a manifest.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{}:{line}: {reason}", file.display())]
pub struct ParseError {
    file: PathBuf,
    line: usize,
    reason: ParseErrorReason,
}

impl ParseError {
    pub(crate) fn new(file: &Path, line: usize, reason: ParseErrorReason) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            reason,
        }
    }

    /// Manifest containing the malformed line.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// 1-based line number of the malformed line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Classification of the failure.
    #[must_use]
    pub const fn reason(&self) -> &ParseErrorReason {
        &self.reason
    }
}

/// Failure while expanding a manifest and its inherited manifests.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The root manifest does not exist.
    #[error("manifest '{}' not found", path.display())]
    ManifestNotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// An inherit directive references a manifest that does not exist.
    #[error(
        "inherited manifest '{}' not found (referenced from {}:{line})",
        path.display(),
        referenced_by.display()
    )]
    MissingInheritedFile {
        /// Resolved path of the missing manifest.
        path: PathBuf,
        /// Manifest holding the directive.
        referenced_by: PathBuf,
        /// Line of the directive.
        line: usize,
    },
    /// Following inherit directives leads back to a manifest that is still
    /// being expanded.
    #[error("manifest inheritance cycle: {}", CycleChain(chain))]
    Cycle {
        /// Every manifest on the inheritance stack, ending with the repeated one.
        chain: Vec<PathBuf>,
    },
    /// A manifest exists but could not be read.
    #[error("failed to read manifest '{}': {source}", path.display())]
    Load {
        /// Manifest that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A manifest contains a malformed line.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

struct CycleChain<'a>(&'a [PathBuf]);

impl fmt::Display for CycleChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, path) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

/// Error returned when a manifest cannot be turned into a [`FilterSet`](crate::FilterSet).
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Loading, parsing or inheritance expansion failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// A rule's pattern could not be compiled.
    #[error(transparent)]
    Filter(#[from] FilterError),
}
