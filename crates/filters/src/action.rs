use std::fmt;

/// Verb attached to a manifest rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterAction {
    /// Select the matching path (`+` in a manifest).
    Include,
    /// Reject the matching path (`-` in a manifest).
    Exclude,
}

impl FilterAction {
    /// Returns the single-character prefix used for this action in manifests.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Include => '+',
            Self::Exclude => '-',
        }
    }

    /// Maps a manifest prefix character back to an action.
    #[must_use]
    pub const fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            '+' => Some(Self::Include),
            '-' => Some(Self::Exclude),
            _ => None,
        }
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}
