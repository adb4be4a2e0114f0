//! Pre-flight checks on the source directory and manifest paths.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Input path that failed validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    /// The source path does not exist or cannot be inspected.
    #[error("source path '{}' not found", path.display())]
    SourceNotFound {
        /// Path as given.
        path: PathBuf,
    },
    /// The source path exists but is not a directory.
    #[error("source path '{}' is not a directory", path.display())]
    SourceNotDirectory {
        /// Path as given.
        path: PathBuf,
    },
    /// The manifest path does not exist or cannot be inspected.
    #[error("manifest path '{}' not found", path.display())]
    ManifestNotFound {
        /// Path as given.
        path: PathBuf,
    },
    /// The manifest path names a directory.
    #[error("manifest path '{}' is a directory, not a file", path.display())]
    ManifestIsDirectory {
        /// Path as given.
        path: PathBuf,
    },
}

impl ValidationError {
    /// Path that failed validation.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceNotFound { path }
            | Self::SourceNotDirectory { path }
            | Self::ManifestNotFound { path }
            | Self::ManifestIsDirectory { path } => path,
        }
    }
}

/// Checks that `source` is a directory and `manifest` is not.
///
/// Symlinks are followed. The source is checked first.
pub fn validate_inputs(source: &Path, manifest: &Path) -> Result<(), ValidationError> {
    let source_metadata = fs::metadata(source).map_err(|_| ValidationError::SourceNotFound {
        path: source.to_path_buf(),
    })?;
    if !source_metadata.is_dir() {
        return Err(ValidationError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    let manifest_metadata =
        fs::metadata(manifest).map_err(|_| ValidationError::ManifestNotFound {
            path: manifest.to_path_buf(),
        })?;
    if manifest_metadata.is_dir() {
        return Err(ValidationError::ManifestIsDirectory {
            path: manifest.to_path_buf(),
        });
    }

    Ok(())
}
