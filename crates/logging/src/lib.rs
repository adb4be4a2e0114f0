#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the diagnostic plumbing shared by the repo-slice
//! workspace. It covers two audiences:
//!
//! - Operators reading structured [`tracing`] events. [`init_tracing`] installs
//!   a stderr subscriber whose filter comes from `RUST_LOG` or, when that is
//!   unset, from the command-line [`Verbosity`]. Library crates emit events
//!   through subsystem macros such as [`trace_walk!`] and [`trace_copy!`] so
//!   every event carries a stable `slice::*` target.
//! - Users reading the command's own output. [`MessageSink`] renders
//!   [`Message`] values (`repo-slice: error: ...`) line by line into any
//!   [`io::Write`](std::io::Write).
//!
//! # Invariants
//!
//! - Library crates never print; they emit events and return errors.
//! - A [`MessageSink`] writes exactly one newline-terminated line per
//!   message.
//!
//! # Examples
//!
//! ```
//! use logging::{Message, MessageSink};
//!
//! let mut sink = MessageSink::new(Vec::new());
//! sink.write(Message::error("manifest path 'm.txt' not found")).unwrap();
//! sink.write(Message::info("done")).unwrap();
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(
//!     output,
//!     "repo-slice: error: manifest path 'm.txt' not found\ndone\n"
//! );
//! ```

mod message;
mod sink;
mod tracing_bridge;
mod tracing_macros;
mod verbosity;

pub use message::{Message, PROGRAM_NAME, Severity};
pub use sink::MessageSink;
pub use tracing_bridge::{env_filter, init_tracing};
pub use verbosity::Verbosity;

/// Tracing targets used by the workspace, one per subsystem.
pub mod targets {
    /// Manifest loading, parsing and inheritance.
    pub const MANIFEST: &str = "slice::manifest";
    /// Per-path rule evaluation.
    pub const FILTER: &str = "slice::filter";
    /// Source tree traversal.
    pub const WALK: &str = "slice::walk";
    /// Materialization of the selection.
    pub const COPY: &str = "slice::copy";
    /// Aggregate counts.
    pub const STATS: &str = "slice::stats";
}

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
