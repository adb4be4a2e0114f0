#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` enumerates a source tree in a deterministic depth-first pre-order:
//! every directory is yielded before its children and siblings are visited in
//! byte order of their names. The order does not depend on the order in which
//! the operating system happens to return directory entries, so selections
//! and dry-run listings are reproducible across machines.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures traversal options such as whether the root entry
//!   should be emitted and if directory symlinks may be followed.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values lazily.
//!   Only the names of the directories on the current path are held in memory.
//! - [`WalkError`] describes I/O failures together with the offending path.
//!
//! # Invariants
//!
//! - Relative paths never contain `..` segments and never escape the root.
//! - Every real directory is entered. When symlink following is enabled, the
//!   canonical paths of the directories on the current path are tracked and a
//!   link back to one of them is reported but not entered, so the walk always
//!   terminates.
//! - The first error ends the walk; the iterator yields `None` afterwards.
//!
//! # Examples
//!
//! ```
//! use walk::WalkBuilder;
//! use std::fs;
//! use std::path::PathBuf;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("src");
//! fs::create_dir_all(root.join("app"))?;
//! fs::write(root.join("main.go"), b"package main")?;
//! fs::write(root.join("app/app.go"), b"package app")?;
//!
//! let mut seen = Vec::new();
//! for entry in WalkBuilder::new(&root).include_root(false).build()? {
//!     seen.push(entry?.relative_path().to_path_buf());
//! }
//!
//! assert_eq!(
//!     seen,
//!     [PathBuf::from("app"), PathBuf::from("app/app.go"), PathBuf::from("main.go")]
//! );
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;

pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
