use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// One entry of a source tree walk.
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) metadata: fs::Metadata,
    pub(crate) depth: usize,
    pub(crate) is_root: bool,
    pub(crate) descended: bool,
}

impl WalkEntry {
    /// Returns the path used to reach the entry on disk.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the traversal root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Consumes the entry and returns its relative path.
    #[must_use]
    pub fn into_relative_path(self) -> PathBuf {
        self.relative_path
    }

    /// Metadata of the entry itself; symlinks are not followed.
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Returns the final component of the relative path, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::WalkBuilder;
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// let root = temp.path().join("root");
    /// std::fs::create_dir(&root)?;
    /// let mut walker = WalkBuilder::new(&root).build()?;
    /// let entry = walker.next().unwrap()?;
    /// assert!(entry.is_dir());
    /// assert!(entry.file_name().is_none());
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        if self.is_root {
            None
        } else {
            self.relative_path.file_name()
        }
    }

    /// Depth below the root; the root itself is `0`.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Indicates whether this entry corresponds to the traversal root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }

    /// Reports whether the entry is treated as a directory.
    ///
    /// True for real directories and for directory symlinks the walker
    /// descended into.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir() || self.descended
    }

    /// Reports whether the entry itself is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.metadata.file_type().is_symlink()
    }

    /// Reports whether the walker descended through this entry as a
    /// followed directory symlink.
    #[must_use]
    pub const fn was_followed(&self) -> bool {
        self.descended
    }
}
