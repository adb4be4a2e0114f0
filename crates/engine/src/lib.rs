#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` drives a repository slice. It validates the inputs, compiles the
//! manifest into a [`filters::FilterSet`], walks the source tree, decides
//! every entry and hands the included ones to a [`Materializer`].
//!
//! # Design
//!
//! - [`SourceTree`] abstracts the walk. [`LocalTree`] reads the filesystem
//!   through the `walk` crate and [`MemoryTree`] serves fixed entries.
//! - [`select`] decides each entry independently against the flattened rule
//!   list. With the `parallel` feature the decisions are computed with
//!   `rayon` and zipped back in traversal order.
//! - [`Materializer`] is the output stage. [`LocalMaterializer`] copies the
//!   selection into the destination, renaming extensions through an
//!   [`ExtensionMap`]; [`ListingMaterializer`] writes the would-be paths.
//! - [`run_slice`] wires the filesystem implementations together, while
//!   [`slice_with`] accepts any loader, tree and materializer.
//!
//! # Invariants
//!
//! - Manifest errors surface before the tree is walked, and walk errors
//!   before anything is written.
//! - Every walked entry receives exactly one decision.
//! - Directories are always descended; an excluded directory never hides a
//!   file that a later rule includes.
//! - The source tree is never modified.
//!
//! # Errors
//!
//! Each stage has its own error type ([`ValidationError`], [`RemapError`],
//! [`filters::ManifestError`], [`SourceError`], [`MaterializeError`]);
//! [`SliceError`] wraps them for [`run_slice`]. Nothing in this crate prints
//! or exits.
//!
//! # Examples
//!
//! ```
//! use engine::{run_slice, SliceOptions};
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = tempfile::tempdir()?;
//! std::fs::write(source.path().join("keep.md"), "keep")?;
//! std::fs::write(source.path().join("drop.log"), "drop")?;
//! let manifest = source.path().join("slice.manifest");
//! std::fs::write(&manifest, "+ *.md\n- *\n")?;
//!
//! let out = tempfile::tempdir()?;
//! let options = SliceOptions::new(&manifest, source.path(), out.path());
//! let report = run_slice(&options, std::io::sink())?;
//! assert_eq!(report.files_selected(), 1);
//! assert!(out.path().join("keep.md").exists());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod materialize;
mod remap;
mod select;
mod slice;
mod source;
mod validate;

pub use error::{SliceError, SliceResult};
pub use materialize::{
    ListingMaterializer, LocalMaterializer, MaterializeError, MaterializeReport, Materializer,
};
pub use remap::{ExtensionMap, RemapError};
pub use select::{Selection, SelectionStats, select};
pub use slice::{SliceOptions, SliceReport, run_slice, slice_with};
pub use source::{EntryKind, LocalTree, MemoryTree, SourceEntry, SourceError, SourceTree};
pub use validate::{ValidationError, validate_inputs};
