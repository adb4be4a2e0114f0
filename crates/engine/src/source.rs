//! Source-tree capability consumed by the selection driver.
//!
//! [`SourceTree`] produces every entry below a root in pre-order, parents
//! before children and siblings sorted by name. [`LocalTree`] walks the real
//! filesystem through the `walk` crate; [`MemoryTree`] serves a fixed tree so
//! selection can be exercised without touching disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use filters::PathEntry;
use thiserror::Error;
use walk::{WalkBuilder, WalkEntry, WalkError};

/// Kind of a source entry as observed during the walk.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory, including a followed directory symlink.
    Directory,
    /// Symbolic link that was not descended into.
    Symlink,
    /// FIFO, socket or device node.
    Other,
}

impl EntryKind {
    /// Returns `true` for [`EntryKind::Directory`].
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    fn of(entry: &WalkEntry) -> Self {
        let file_type = entry.metadata().file_type();
        if entry.is_dir() {
            Self::Directory
        } else if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// One entry below the source root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceEntry {
    path: PathBuf,
    entry: PathEntry,
    kind: EntryKind,
}

impl SourceEntry {
    /// Creates an entry for `path`, relative to the source root.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let entry = PathEntry::from_path(&path, kind.is_dir());
        Self { path, entry, kind }
    }

    /// Native relative path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forward-slash form used for rule matching.
    #[must_use]
    pub const fn entry(&self) -> &PathEntry {
        &self.entry
    }

    /// Kind of the entry.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns `true` when the entry is decided as a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Error raised while enumerating a source tree.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Filesystem traversal failed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The requested root is not part of the tree.
    #[error("source root '{}' does not exist", root.display())]
    MissingRoot {
        /// Root that was requested.
        root: PathBuf,
    },
}

/// Producer of source entries.
pub trait SourceTree {
    /// Lists every entry below `root`, excluding `root` itself.
    ///
    /// Entries come in pre-order: a directory precedes its contents and
    /// siblings are sorted by the bytes of their names.
    fn walk(&self, root: &Path) -> Result<Vec<SourceEntry>, SourceError>;
}

impl<T: SourceTree + ?Sized> SourceTree for &T {
    fn walk(&self, root: &Path) -> Result<Vec<SourceEntry>, SourceError> {
        (**self).walk(root)
    }
}

/// Walks the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTree {
    follow_symlinks: bool,
}

impl LocalTree {
    /// Creates a walker that reports symlinks without following them.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            follow_symlinks: false,
        }
    }

    /// Descends into symlinked directories, skipping ones already visited.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl SourceTree for LocalTree {
    fn walk(&self, root: &Path) -> Result<Vec<SourceEntry>, SourceError> {
        let walker = WalkBuilder::new(root)
            .include_root(false)
            .follow_symlinks(self.follow_symlinks)
            .build()?;

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let kind = EntryKind::of(&entry);
            entries.push(SourceEntry::new(entry.into_relative_path(), kind));
        }
        Ok(entries)
    }
}

/// Fixed in-memory tree.
///
/// Parent directories of added entries are created implicitly.
///
/// ```
/// use engine::{EntryKind, MemoryTree, SourceTree};
/// use std::path::Path;
///
/// let tree = MemoryTree::new("/repo")
///     .with_file("src/main.rs")
///     .with_file("README.md");
/// let entries = tree.walk(Path::new("/repo")).unwrap();
/// let paths: Vec<&str> = entries.iter().map(|e| e.entry().relative_path()).collect();
/// assert_eq!(paths, ["README.md", "src", "src/main.rs"]);
/// assert_eq!(entries[1].kind(), EntryKind::Directory);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryTree {
    root: PathBuf,
    entries: BTreeMap<PathBuf, EntryKind>,
}

impl MemoryTree {
    /// Creates an empty tree served under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Adds a regular file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_entry(path, EntryKind::File)
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.with_entry(path, EntryKind::Directory)
    }

    /// Adds a symbolic link.
    #[must_use]
    pub fn with_symlink(self, path: impl Into<PathBuf>) -> Self {
        self.with_entry(path, EntryKind::Symlink)
    }

    /// Adds an entry of the given kind.
    #[must_use]
    pub fn with_entry(mut self, path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        self.insert(path, kind);
        self
    }

    /// Adds an entry of the given kind in place.
    pub fn insert(&mut self, path: impl Into<PathBuf>, kind: EntryKind) {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.entries
                .entry(ancestor.to_path_buf())
                .or_insert(EntryKind::Directory);
        }
        self.entries.insert(path, kind);
    }

    /// Number of entries, implicit directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the tree holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SourceTree for MemoryTree {
    fn walk(&self, root: &Path) -> Result<Vec<SourceEntry>, SourceError> {
        if root != self.root {
            return Err(SourceError::MissingRoot {
                root: root.to_path_buf(),
            });
        }
        // Component-wise path ordering is pre-order with sorted siblings.
        Ok(self
            .entries
            .iter()
            .map(|(path, kind)| SourceEntry::new(path.clone(), *kind))
            .collect())
    }
}
