use std::path::PathBuf;

/// Parsed command-line arguments.
///
/// # Field Semantics
///
/// - **`bool`**: flag present (`true`) or absent (`false`).
/// - **`Option<T>`**: value given (`Some`) or not (`None`). `manifest` and
///   `output` are only `None` when help or version was requested.
///
/// **Warning**: This type is exposed via `cli::test_utils` for integration
/// tests only. It is not part of the stable public API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Display help message and exit.
    ///
    /// Corresponds to: `--help`, `-h`
    pub show_help: bool,

    /// Display version information and exit.
    ///
    /// Corresponds to: `--version`, `-V`
    pub show_version: bool,

    /// Manifest to resolve.
    ///
    /// Corresponds to: `--manifest`, `-m`
    pub manifest: Option<PathBuf>,

    /// Source tree root.
    ///
    /// Corresponds to: `--source`, `-s`
    ///
    /// Default: `.`
    pub source: PathBuf,

    /// Destination directory.
    ///
    /// Corresponds to: `--output`, `-o`
    pub output: Option<PathBuf>,

    /// Extension map text.
    ///
    /// Corresponds to: `--remap-extensions`
    pub remap: Option<String>,

    /// List the selection instead of copying it.
    ///
    /// Corresponds to: `--dry-run`, `-n`
    pub dry_run: bool,

    /// Descend into symlinked directories.
    ///
    /// Corresponds to: `--follow-symlinks`, `-L`
    pub follow_symlinks: bool,

    /// Number of `-v` occurrences.
    ///
    /// Corresponds to: `--verbose`, `-v`
    pub verbose: u8,

    /// Only report errors.
    ///
    /// Corresponds to: `--quiet`, `-q`
    pub quiet: bool,
}
