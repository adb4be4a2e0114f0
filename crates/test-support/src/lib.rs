//! Temporary directory trees for tests.
//!
//! [`TestTree`] owns a [`tempfile::TempDir`] and offers chaining helpers to
//! populate it. The directory is removed when the tree is dropped.

#![allow(clippy::missing_panics_doc)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory populated through chained calls.
///
/// Helpers panic on I/O failure; they are meant for tests only.
#[derive(Debug)]
pub struct TestTree {
    dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Creates an empty temporary directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temporary directory"),
        }
    }

    /// Root of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    #[must_use]
    pub fn file(self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write fixture file");
        self
    }

    /// Creates the directory `relative` and its parents.
    #[must_use]
    pub fn dir(self, relative: impl AsRef<Path>) -> Self {
        fs::create_dir_all(self.join(relative)).expect("create fixture directory");
        self
    }

    /// Creates a symbolic link at `relative` pointing to `target` verbatim.
    #[cfg(unix)]
    #[must_use]
    pub fn symlink(self, relative: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        std::os::unix::fs::symlink(target, &path).expect("create fixture symlink");
        self
    }

    /// Reads `relative` as UTF-8.
    #[must_use]
    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.join(relative)).expect("read fixture file")
    }

    /// Returns `true` when `relative` exists, without following a final symlink.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        fs::symlink_metadata(self.join(relative)).is_ok()
    }
}

/// Sorted forward-slash paths of every non-directory entry below `root`.
#[must_use]
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, root, &mut out, false);
    out.sort();
    out
}

/// Sorted forward-slash paths of every entry below `root`, directories
/// suffixed with `/`.
#[must_use]
pub fn relative_entries(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, root, &mut out, true);
    out.sort();
    out
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>, with_dirs: bool) {
    for entry in fs::read_dir(dir).expect("read fixture directory") {
        let entry = entry.expect("read fixture entry");
        let path = entry.path();
        let relative = path
            .strip_prefix(root)
            .expect("entry below root")
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let file_type = entry.file_type().expect("fixture file type");
        if file_type.is_dir() {
            if with_dirs {
                out.push(format!("{relative}/"));
            }
            collect(root, &path, out, with_dirs);
        } else {
            out.push(relative);
        }
    }
}
