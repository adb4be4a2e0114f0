use std::fmt;
use std::path::{Component, Path};

/// Path encountered during a tree walk, relative to the source root.
///
/// The relative path always uses `/` as the separator regardless of the host
/// platform so that manifest patterns behave identically everywhere.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PathEntry {
    relative_path: String,
    is_dir: bool,
}

impl PathEntry {
    /// Creates an entry from a forward-slash relative path.
    ///
    /// Leading and trailing separators are stripped so that `"/docs/"` and
    /// `"docs"` describe the same entry.
    #[must_use]
    pub fn new(relative_path: impl Into<String>, is_dir: bool) -> Self {
        let mut relative_path = relative_path.into();
        let trimmed = relative_path.trim_matches('/');
        if trimmed.len() != relative_path.len() {
            relative_path = trimmed.to_owned();
        }
        Self {
            relative_path,
            is_dir,
        }
    }

    /// Convenience constructor for a non-directory entry.
    #[must_use]
    pub fn file(relative_path: impl Into<String>) -> Self {
        Self::new(relative_path, false)
    }

    /// Convenience constructor for a directory entry.
    #[must_use]
    pub fn directory(relative_path: impl Into<String>) -> Self {
        Self::new(relative_path, true)
    }

    /// Builds an entry from a native relative path.
    ///
    /// Only normal components are kept; `.` and root/prefix components are
    /// dropped. Names that are not valid UTF-8 are converted lossily, which
    /// only affects how they are matched, never how they are copied.
    #[must_use]
    pub fn from_path(path: &Path, is_dir: bool) -> Self {
        let mut relative_path = String::new();
        for component in path.components() {
            if let Component::Normal(name) = component {
                if !relative_path.is_empty() {
                    relative_path.push('/');
                }
                relative_path.push_str(&name.to_string_lossy());
            }
        }
        Self {
            relative_path,
            is_dir,
        }
    }

    /// Returns the forward-slash relative path.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Reports whether the entry is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns the final path segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or(self.relative_path.as_str(), |(_, name)| name)
    }

    /// Returns the number of segments below the root (`a/b` has depth 2).
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.relative_path.is_empty() {
            0
        } else {
            self.relative_path.matches('/').count() + 1
        }
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path)?;
        if self.is_dir {
            f.write_str("/")?;
        }
        Ok(())
    }
}
