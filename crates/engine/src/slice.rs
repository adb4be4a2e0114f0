//! End-to-end slice: validate, resolve, walk, select, materialize.

use std::io::Write;
use std::path::{Path, PathBuf};

use filters::{FilterSet, FsLoader, ManifestLoader};
use logging::{trace_manifest, trace_stats};

use crate::error::SliceResult;
use crate::materialize::{ListingMaterializer, LocalMaterializer, MaterializeReport, Materializer};
use crate::remap::ExtensionMap;
use crate::select::{SelectionStats, select};
use crate::source::{LocalTree, SourceTree};
use crate::validate::validate_inputs;

/// Inputs of one slice run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SliceOptions {
    manifest: PathBuf,
    source: PathBuf,
    output: PathBuf,
    remap: Option<String>,
    dry_run: bool,
    follow_symlinks: bool,
}

impl SliceOptions {
    /// Slices `source` into `output` using the rules in `manifest`.
    #[must_use]
    pub fn new(
        manifest: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            source: source.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Renames copied files through comma-separated `old:new` pairs.
    #[must_use]
    pub fn remap_extensions(mut self, map: impl Into<String>) -> Self {
        self.remap = Some(map.into());
        self
    }

    /// Lists the selection instead of copying it.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Descends into symlinked directories of the source tree.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Manifest path.
    #[must_use]
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Source root.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination root.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Extension map text, if any.
    #[must_use]
    pub fn remap(&self) -> Option<&str> {
        self.remap.as_deref()
    }

    /// Whether the run only lists the selection.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Whether symlinked directories are followed.
    #[must_use]
    pub const fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Parses the extension map, empty when none was given.
    pub fn extension_map(&self) -> SliceResult<ExtensionMap> {
        Ok(ExtensionMap::parse(self.remap.as_deref().unwrap_or(""))?)
    }
}

/// Outcome of a successful slice.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SliceReport {
    rules: usize,
    selection: SelectionStats,
    files_selected: usize,
    materialized: MaterializeReport,
}

impl SliceReport {
    /// Rules in the flattened manifest.
    #[must_use]
    pub const fn rule_count(&self) -> usize {
        self.rules
    }

    /// Decision counts over the whole source tree.
    #[must_use]
    pub const fn selection(&self) -> SelectionStats {
        self.selection
    }

    /// Non-directory entries selected.
    #[must_use]
    pub const fn files_selected(&self) -> usize {
        self.files_selected
    }

    /// What the materializer did.
    #[must_use]
    pub const fn materialized(&self) -> MaterializeReport {
        self.materialized
    }
}

/// Runs a slice against the local filesystem.
///
/// Inputs are validated first. A dry run writes its listing to `listing`;
/// otherwise `listing` is left untouched and the selection is copied into
/// the output directory.
pub fn run_slice<W: Write>(options: &SliceOptions, listing: W) -> SliceResult<SliceReport> {
    validate_inputs(options.source(), options.manifest())?;
    let extensions = options.extension_map()?;
    let tree = LocalTree::new().follow_symlinks(options.follows_symlinks());

    if options.is_dry_run() {
        let mut materializer = ListingMaterializer::new(listing).with_extensions(extensions);
        slice_with(options, &FsLoader, &tree, &mut materializer)
    } else {
        let mut materializer = LocalMaterializer::new().with_extensions(extensions);
        slice_with(options, &FsLoader, &tree, &mut materializer)
    }
}

/// Runs a slice with injected capabilities.
///
/// No validation is performed. The manifest is resolved through `loader`
/// and compiled before `tree` is walked; the walk completes before
/// `materializer` sees the selection.
///
/// ```
/// use engine::{ListingMaterializer, MemoryTree, SliceOptions, slice_with};
/// use filters::MemoryLoader;
///
/// let loader = MemoryLoader::new()
///     .with_file("/repo/slice.manifest", "+ /file.txt\n- /slice.manifest\n");
/// let tree = MemoryTree::new("/repo")
///     .with_file("file.txt")
///     .with_file("slice.manifest");
/// let options = SliceOptions::new("/repo/slice.manifest", "/repo", "/out");
///
/// let mut listing = ListingMaterializer::new(Vec::new());
/// let report = slice_with(&options, &loader, &tree, &mut listing).unwrap();
/// assert_eq!(report.files_selected(), 1);
/// assert_eq!(listing.into_inner(), b"file.txt\n");
/// ```
pub fn slice_with<L, T, M>(
    options: &SliceOptions,
    loader: &L,
    tree: &T,
    materializer: &mut M,
) -> SliceResult<SliceReport>
where
    L: ManifestLoader + ?Sized,
    T: SourceTree + ?Sized,
    M: Materializer + ?Sized,
{
    let filter = FilterSet::from_manifest(options.manifest(), loader)?;
    trace_manifest!(
        level: INFO,
        "resolved {} rules ({} distinct patterns) from {}",
        filter.len(),
        filter.pattern_count(),
        options.manifest().display()
    );

    let entries = tree.walk(options.source())?;
    let selection = select(&filter, entries);
    let materialized = materializer.materialize(&selection, options.source(), options.output())?;

    let report = SliceReport {
        rules: filter.len(),
        selection: selection.stats(),
        files_selected: selection.len(),
        materialized,
    };
    trace_stats!(
        "slice complete: {} of {} entries selected",
        report.selection.included(),
        report.selection.evaluated()
    );
    Ok(report)
}
