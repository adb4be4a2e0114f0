use std::path::PathBuf;

use crate::error::WalkError;
use crate::walker::Walker;

/// Traversal switches shared by the builder and the walker.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct WalkOptions {
    pub(crate) follow_symlinks: bool,
    pub(crate) skip_root: bool,
}

/// Configures a walk of one source tree.
///
/// By default the root itself is yielded first and symlinks are reported
/// without being entered.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    options: WalkOptions,
}

impl WalkBuilder {
    /// Starts a walk rooted at `root`. Relative roots are resolved against
    /// the working directory when the walker is built.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            options: WalkOptions::default(),
        }
    }

    /// Enters symlinks that resolve to directories.
    ///
    /// Descendants keep the link's relative path as their prefix. A link is
    /// not entered when its target is the directory being walked or one of
    /// its ancestors.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.options.follow_symlinks = follow;
        self
    }

    /// Yields the root entry before its children when `include` is `true`.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.options.skip_root = !include;
        self
    }

    /// Opens the root and returns the iterator.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError`] when the root cannot be inspected or, for a
    /// directory root, listed.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(self.root, self.options)
    }
}
