//! Materializers turn a [`Selection`] into output.
//!
//! [`LocalMaterializer`] reproduces the selected entries under a destination
//! root, keeping their relative paths. [`ListingMaterializer`] only reports
//! what would be written.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use logging::trace_copy;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::remap::ExtensionMap;
use crate::select::Selection;
use crate::source::{EntryKind, SourceEntry};

/// I/O failure while materializing, with the action that failed.
#[derive(Debug, Error)]
#[error("failed to {action} '{}': {source}", path.display())]
pub struct MaterializeError {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl MaterializeError {
    /// Constructs an error for `action` on `path`.
    #[must_use]
    pub fn new(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            action,
            path: path.into(),
            source,
        }
    }

    /// Short description of the failed operation.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.action
    }

    /// Path the operation was applied to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Underlying I/O error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.source
    }
}

/// Counts collected while materializing a selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaterializeReport {
    files: usize,
    symlinks: usize,
    directories: usize,
    bytes: u64,
    renamed: usize,
    skipped: usize,
}

impl MaterializeReport {
    /// Regular files written.
    #[must_use]
    pub const fn files_copied(&self) -> usize {
        self.files
    }

    /// Symbolic links recreated.
    #[must_use]
    pub const fn symlinks_created(&self) -> usize {
        self.symlinks
    }

    /// Directories created below the destination root.
    #[must_use]
    pub const fn directories_created(&self) -> usize {
        self.directories
    }

    /// Bytes of file content written.
    #[must_use]
    pub const fn bytes_copied(&self) -> u64 {
        self.bytes
    }

    /// Entries whose extension was remapped.
    #[must_use]
    pub const fn files_renamed(&self) -> usize {
        self.renamed
    }

    /// Special files that were not reproduced.
    #[must_use]
    pub const fn entries_skipped(&self) -> usize {
        self.skipped
    }
}

/// Output stage of a slice.
pub trait Materializer {
    /// Reproduces `selection`, read from `source_root`, under
    /// `destination_root`.
    fn materialize(
        &mut self,
        selection: &Selection,
        source_root: &Path,
        destination_root: &Path,
    ) -> Result<MaterializeReport, MaterializeError>;
}

impl<M: Materializer + ?Sized> Materializer for &mut M {
    fn materialize(
        &mut self,
        selection: &Selection,
        source_root: &Path,
        destination_root: &Path,
    ) -> Result<MaterializeReport, MaterializeError> {
        (**self).materialize(selection, source_root, destination_root)
    }
}

/// Destination-relative path of `entry`, renamed through `extensions`.
fn destination_path(entry: &SourceEntry, extensions: &ExtensionMap) -> (PathBuf, bool) {
    if entry.is_dir() {
        return (entry.path().to_path_buf(), false);
    }
    match entry
        .path()
        .file_name()
        .and_then(|name| extensions.remap(name))
    {
        Some(renamed) => (entry.path().with_file_name(renamed), true),
        None => (entry.path().to_path_buf(), false),
    }
}

/// Copies the selection onto the local filesystem.
///
/// Existing destination files are overwritten. Symbolic links are recreated
/// as links on Unix and copied through elsewhere. FIFOs, sockets and device
/// nodes are skipped.
#[derive(Clone, Debug, Default)]
pub struct LocalMaterializer {
    extensions: ExtensionMap,
}

impl LocalMaterializer {
    /// Creates a materializer that keeps file names unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames copied files through `extensions`.
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionMap) -> Self {
        self.extensions = extensions;
        self
    }
}

impl Materializer for LocalMaterializer {
    fn materialize(
        &mut self,
        selection: &Selection,
        source_root: &Path,
        destination_root: &Path,
    ) -> Result<MaterializeReport, MaterializeError> {
        fs::create_dir_all(destination_root).map_err(|error| {
            MaterializeError::new("create destination directory", destination_root, error)
        })?;

        let mut directories = DirectoryTracker::new(destination_root);
        let mut report = MaterializeReport::default();

        for entry in selection.entries() {
            let (relative, renamed) = destination_path(entry, &self.extensions);
            let destination = destination_root.join(&relative);
            let source = source_root.join(entry.path());

            if let Some(parent) = destination.parent() {
                directories.ensure(parent)?;
            }

            match entry.kind() {
                EntryKind::Directory => {
                    directories.ensure(&destination)?;
                    continue;
                }
                EntryKind::File => {
                    let bytes = fs::copy(&source, &destination)
                        .map_err(|error| MaterializeError::new("copy file", &source, error))?;
                    trace_copy!(level: DEBUG, "copied {} ({bytes} bytes)", relative.display());
                    report.files += 1;
                    report.bytes += bytes;
                }
                EntryKind::Symlink => {
                    let bytes = copy_symlink(&source, &destination)?;
                    trace_copy!(level: DEBUG, "linked {}", relative.display());
                    if bytes == 0 {
                        report.symlinks += 1;
                    } else {
                        report.files += 1;
                        report.bytes += bytes;
                    }
                }
                EntryKind::Other => {
                    trace_copy!(level: WARN, "skipping special file {}", entry.path().display());
                    report.skipped += 1;
                    continue;
                }
            }

            if renamed {
                report.renamed += 1;
            }
        }

        report.directories = directories.created;
        trace_copy!(
            "materialized {} files, {} symlinks, {} directories ({} bytes) into {}",
            report.files,
            report.symlinks,
            report.directories,
            report.bytes,
            destination_root.display()
        );
        Ok(report)
    }
}

/// Recreates `source` at `destination`. Returns the bytes copied when the
/// link had to be copied through.
#[cfg(unix)]
fn copy_symlink(source: &Path, destination: &Path) -> Result<u64, MaterializeError> {
    use std::os::unix::fs::symlink;

    let target = fs::read_link(source)
        .map_err(|error| MaterializeError::new("read symbolic link", source, error))?;
    if fs::symlink_metadata(destination).is_ok() {
        fs::remove_file(destination)
            .map_err(|error| MaterializeError::new("replace existing entry", destination, error))?;
    }
    symlink(&target, destination)
        .map_err(|error| MaterializeError::new("create symbolic link", destination, error))?;
    Ok(0)
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, destination: &Path) -> Result<u64, MaterializeError> {
    fs::copy(source, destination)
        .map_err(|error| MaterializeError::new("copy file", source, error))
}

/// Creates destination directories once, counting the ones it made.
struct DirectoryTracker {
    known: FxHashSet<PathBuf>,
    created: usize,
}

impl DirectoryTracker {
    fn new(root: &Path) -> Self {
        let mut known = FxHashSet::default();
        known.insert(root.to_path_buf());
        Self { known, created: 0 }
    }

    fn ensure(&mut self, dir: &Path) -> Result<(), MaterializeError> {
        if self.known.contains(dir) {
            return Ok(());
        }

        match fs::symlink_metadata(dir) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(MaterializeError::new(
                    "create directory",
                    dir,
                    io::Error::new(io::ErrorKind::AlreadyExists, "a non-directory is in the way"),
                ));
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = dir.parent() {
                    self.ensure(parent)?;
                }
                fs::create_dir(dir)
                    .map_err(|error| MaterializeError::new("create directory", dir, error))?;
                trace_copy!(level: TRACE, "created directory {}", dir.display());
                self.created += 1;
            }
            Err(error) => return Err(MaterializeError::new("inspect", dir, error)),
        }

        self.known.insert(dir.to_path_buf());
        Ok(())
    }
}

/// Writes the selection as a listing instead of copying it.
///
/// One line per included entry in traversal order, forward slashes,
/// directories suffixed with `/`. Renamed files are listed under their
/// destination name.
#[derive(Debug)]
pub struct ListingMaterializer<W> {
    writer: W,
    extensions: ExtensionMap,
}

impl<W: Write> ListingMaterializer<W> {
    /// Lists into `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            extensions: ExtensionMap::default(),
        }
    }

    /// Lists files under their remapped names.
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionMap) -> Self {
        self.extensions = extensions;
        self
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Materializer for ListingMaterializer<W> {
    fn materialize(
        &mut self,
        selection: &Selection,
        _source_root: &Path,
        destination_root: &Path,
    ) -> Result<MaterializeReport, MaterializeError> {
        let mut report = MaterializeReport::default();
        let write_failed = |error| MaterializeError::new("write listing for", destination_root, error);

        for entry in selection.entries() {
            let (relative, renamed) = destination_path(entry, &self.extensions);
            let listed = filters::PathEntry::from_path(&relative, entry.is_dir());
            writeln!(self.writer, "{listed}").map_err(write_failed)?;

            match entry.kind() {
                EntryKind::Directory => report.directories += 1,
                EntryKind::File => report.files += 1,
                EntryKind::Symlink => report.symlinks += 1,
                EntryKind::Other => report.skipped += 1,
            }
            if renamed {
                report.renamed += 1;
            }
        }
        self.writer.flush().map_err(write_failed)?;
        Ok(report)
    }
}
