//! crates/logging/src/verbosity.rs
//! Command-line verbosity mapped onto tracing filters.

use std::fmt;

use tracing::level_filters::LevelFilter;

/// How much diagnostic output the user asked for.
///
/// Built from the repeatable `-v` flag and `-q`. Quiet wins over any number of
/// `-v` flags.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Progress information (`-v`).
    Verbose,
    /// Per-manifest and per-directory detail (`-vv`).
    Debug,
    /// Every rule evaluation (`-vvv` and above).
    Trace,
}

impl Verbosity {
    /// Maps flag counts to a level.
    ///
    /// ```
    /// use logging::Verbosity;
    ///
    /// assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
    /// assert_eq!(Verbosity::from_flags(2, false), Verbosity::Debug);
    /// assert_eq!(Verbosity::from_flags(7, false), Verbosity::Trace);
    /// assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
    /// ```
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Maximum tracing level recorded at this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// `EnvFilter` directive equivalent to [`level_filter`](Self::level_filter).
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Reports whether informational summaries should be printed.
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Trace => "trace",
        })
    }
}
