//! Common error type for the engine crate.

use filters::ManifestError;
use thiserror::Error;

use crate::materialize::MaterializeError;
use crate::remap::RemapError;
use crate::source::SourceError;
use crate::validate::ValidationError;

/// Result type for slice operations.
pub type SliceResult<T> = Result<T, SliceError>;

/// Failure of one stage of a slice.
///
/// Stages run in order and the first failure stops the slice: nothing is
/// walked on a broken manifest and nothing is written after a walk error.
#[derive(Debug, Error)]
pub enum SliceError {
    /// Source or manifest path is unusable.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Extension map text is malformed.
    #[error(transparent)]
    Remap(#[from] RemapError),
    /// Manifest could not be parsed, resolved or compiled.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    /// Source tree could not be walked.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Output could not be written.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

impl SliceError {
    /// Returns `true` for failures detected before the source tree is read.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Remap(_) | Self::Manifest(_)
        )
    }
}
