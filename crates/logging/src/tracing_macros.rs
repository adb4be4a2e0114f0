//! crates/logging/src/tracing_macros.rs
//! Convenience macros for repo-slice tracing.
//!
//! Each macro wraps a standard tracing macro with the target of one
//! subsystem (see [`targets`](crate::targets)). The default level suits the
//! subsystem; prefix the arguments with `level: LEVEL,` to override it.

/// Emit a manifest loading trace.
///
/// # Example
/// ```ignore
/// trace_manifest!("resolved {} rules from {}", count, path.display());
/// ```
#[macro_export]
macro_rules! trace_manifest {
    (level: $level:ident, $($arg:tt)*) => {
        $crate::__private::tracing::event!(
            target: "slice::manifest",
            $crate::__private::tracing::Level::$level,
            $($arg)*
        )
    };
    ($($arg:tt)*) => {
        $crate::__private::tracing::debug!(target: "slice::manifest", $($arg)*)
    };
}

/// Emit a rule evaluation trace.
///
/// # Example
/// ```ignore
/// trace_filter!(path = %entry, "excluded by default");
/// ```
#[macro_export]
macro_rules! trace_filter {
    (level: $level:ident, $($arg:tt)*) => {
        $crate::__private::tracing::event!(
            target: "slice::filter",
            $crate::__private::tracing::Level::$level,
            $($arg)*
        )
    };
    ($($arg:tt)*) => {
        $crate::__private::tracing::trace!(target: "slice::filter", $($arg)*)
    };
}

/// Emit a source tree traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory: {:?}", path);
/// ```
#[macro_export]
macro_rules! trace_walk {
    (level: $level:ident, $($arg:tt)*) => {
        $crate::__private::tracing::event!(
            target: "slice::walk",
            $crate::__private::tracing::Level::$level,
            $($arg)*
        )
    };
    ($($arg:tt)*) => {
        $crate::__private::tracing::debug!(target: "slice::walk", $($arg)*)
    };
}

/// Emit a materialization trace.
///
/// # Example
/// ```ignore
/// trace_copy!("copying {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_copy {
    (level: $level:ident, $($arg:tt)*) => {
        $crate::__private::tracing::event!(
            target: "slice::copy",
            $crate::__private::tracing::Level::$level,
            $($arg)*
        )
    };
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(target: "slice::copy", $($arg)*)
    };
}

/// Emit a statistics trace.
///
/// # Example
/// ```ignore
/// trace_stats!("selected {} of {} entries", included, total);
/// ```
#[macro_export]
macro_rules! trace_stats {
    (level: $level:ident, $($arg:tt)*) => {
        $crate::__private::tracing::event!(
            target: "slice::stats",
            $crate::__private::tracing::Level::$level,
            $($arg)*
        )
    };
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(target: "slice::stats", $($arg)*)
    };
}
