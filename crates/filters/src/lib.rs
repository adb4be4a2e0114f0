#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` turns slice manifests into ordered include/exclude decisions.
//! A manifest is a line-oriented text file of `+ pattern` and `- pattern`
//! rules, `# comments`, and `. path` directives that inherit the rules of
//! another manifest. This crate parses manifests, expands inheritance into a
//! single flattened rule list, compiles the patterns into glob matchers and
//! decides, for every path relative to the source root, whether it belongs to
//! the slice.
//!
//! # Design
//!
//! - [`parse_manifest`] is a pure function from manifest text to
//!   [`ManifestItem`]s. Each rule remembers the file and line it came from.
//! - [`resolve_manifest`] expands `. path` directives depth-first and
//!   pre-order through a [`ManifestLoader`], so the same code runs against
//!   the filesystem ([`FsLoader`]) and in-memory fixtures ([`MemoryLoader`]).
//!   A [`ManifestCache`] may be passed in to share parsed manifests between
//!   resolutions.
//! - [`FilterSet`] owns the compiled representation of the flattened list.
//!   Identical pattern texts are compiled once.
//! - Matching operates on [`PathEntry`] values: a forward-slash relative path
//!   plus a directory flag.
//!
//! # Invariants
//!
//! - Rules are evaluated in flattened declaration order. The first matching
//!   rule decides; an entry matched by no rule is excluded.
//! - Leading `/` anchors a rule to the source root. Patterns without a leading
//!   slash match at any depth by implicitly prefixing `**/`.
//! - Trailing `/` marks a directory-only rule. It never applies to the
//!   directory's contents; every entry is decided on its own.
//! - Inheritance cycles are detected on canonical paths and reported with the
//!   full chain. Resolution never loops.
//!
//! # Errors
//!
//! [`ParseError`] names the file and line of a malformed rule.
//! [`ResolveError`] covers missing manifests, cycles and read failures.
//! [`FilterError`] reports a pattern that does not compile, with the
//! underlying [`globset::Error`]. [`ManifestError`] combines the last two for
//! [`FilterSet::from_manifest`].
//!
//! # Examples
//!
//! ```
//! use filters::{FilterSet, MemoryLoader, PathEntry};
//! use std::path::Path;
//!
//! let loader = MemoryLoader::new()
//!     .with_file("/slices/base.manifest", "- *.log\n")
//!     .with_file(
//!         "/slices/api.manifest",
//!         ". base.manifest\n+ /src/**\n+ /go.mod\n- *\n",
//!     );
//! let set = FilterSet::from_manifest(Path::new("/slices/api.manifest"), &loader)
//!     .expect("manifest resolves");
//!
//! assert!(set.allows_entry(&PathEntry::file("src/app/app.go")));
//! assert!(set.allows_entry(&PathEntry::file("go.mod")));
//! assert!(!set.allows_entry(&PathEntry::file("src/debug.log")));
//! assert!(!set.allows_entry(&PathEntry::file("README.md")));
//! ```
//!
//! # See also
//!
//! - `engine::select` drives a [`FilterSet`] over a walked source tree.
//! - [`globset`] for the glob matching primitives used internally.

mod action;
pub mod debug_filter;
mod decision;
mod entry;
mod error;
pub mod merge;
mod parse;
mod pattern;
mod rule;
mod set;

pub use action::FilterAction;
pub use decision::{Decision, FilterDecision};
pub use entry::PathEntry;
pub use error::{FilterError, ManifestError, ParseError, ParseErrorReason, ResolveError};
pub use merge::{
    FsLoader, ManifestCache, ManifestLoader, MemoryLoader, read_manifest, resolve_manifest,
    resolve_manifest_with_cache,
};
pub use parse::{InheritDirective, ManifestItem, parse_manifest};
pub use pattern::{Pattern, PatternMatch};
pub use rule::{FilterRule, RuleOrigin};
pub use set::FilterSet;

#[cfg(test)]
mod tests;
