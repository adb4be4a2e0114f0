//! First-match-wins selection over a walked source tree.
//!
//! Every entry is decided on its own against the full rule list. A directory
//! that is excluded is still walked, so a deeper include can select files
//! below it.

use filters::debug_filter::FilterTracer;
use filters::FilterSet;
use logging::trace_stats;

use crate::source::SourceEntry;

/// Counts collected while deciding a tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectionStats {
    evaluated: usize,
    included: usize,
    excluded: usize,
}

impl SelectionStats {
    /// Number of entries decided.
    #[must_use]
    pub const fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Number of entries decided `Included`, directories included.
    #[must_use]
    pub const fn included(&self) -> usize {
        self.included
    }

    /// Number of entries decided `Excluded`.
    #[must_use]
    pub const fn excluded(&self) -> usize {
        self.excluded
    }
}

impl From<&FilterTracer> for SelectionStats {
    fn from(tracer: &FilterTracer) -> Self {
        Self {
            evaluated: tracer.total_evaluated(),
            included: tracer.total_included(),
            excluded: tracer.total_excluded(),
        }
    }
}

/// Entries decided `Included`, in traversal order.
///
/// Files, symlinks and other non-directory entries are the leaf selection.
/// Included directories are reported too so a materializer can recreate them
/// even when nothing below them is selected.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    entries: Vec<SourceEntry>,
    file_count: usize,
    stats: SelectionStats,
}

impl Selection {
    /// Every included entry, directories and files interleaved as walked.
    #[must_use]
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    /// Selected non-directory entries.
    pub fn files(&self) -> impl Iterator<Item = &SourceEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.is_dir())
    }

    /// Directories decided `Included`.
    pub fn directories(&self) -> impl Iterator<Item = &SourceEntry> + '_ {
        self.entries.iter().filter(|entry| entry.is_dir())
    }

    /// Decision counts for the whole walk.
    #[must_use]
    pub const fn stats(&self) -> SelectionStats {
        self.stats
    }

    /// Forward-slash paths of the selected files.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.files().map(|entry| entry.entry().relative_path())
    }

    /// Returns `true` when no file was selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Number of selected files.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.file_count
    }
}

/// Decides every entry and partitions the included ones.
///
/// ```
/// use engine::{select, EntryKind, SourceEntry};
/// use filters::{FilterRule, FilterSet};
///
/// let set = FilterSet::from_rules([
///     FilterRule::include("/a.txt"),
///     FilterRule::exclude("*"),
/// ])
/// .unwrap();
/// let entries = vec![
///     SourceEntry::new("a.txt", EntryKind::File),
///     SourceEntry::new("b.txt", EntryKind::File),
/// ];
/// let selection = select(&set, entries);
/// assert_eq!(selection.file_paths().collect::<Vec<_>>(), ["a.txt"]);
/// assert_eq!(selection.stats().excluded(), 1);
/// ```
#[must_use]
pub fn select(filter: &FilterSet, entries: Vec<SourceEntry>) -> Selection {
    let included = decide_all(filter, &entries);

    let mut tracer = FilterTracer::new();
    let mut selected = Vec::new();
    let mut file_count = 0;
    for (entry, included) in entries.into_iter().zip(included) {
        tracer.record_evaluation(included);
        if included {
            if !entry.is_dir() {
                file_count += 1;
            }
            selected.push(entry);
        }
    }
    tracer.summary();

    let stats = SelectionStats::from(&tracer);
    trace_stats!(
        "selected {} files and {} directories ({} evaluated, {} excluded)",
        file_count,
        selected.len() - file_count,
        stats.evaluated(),
        stats.excluded()
    );

    Selection {
        entries: selected,
        file_count,
        stats,
    }
}

#[cfg(feature = "parallel")]
fn decide_all(filter: &FilterSet, entries: &[SourceEntry]) -> Vec<bool> {
    use rayon::prelude::*;

    entries
        .par_iter()
        .map(|entry| filter.allows_entry(entry.entry()))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn decide_all(filter: &FilterSet, entries: &[SourceEntry]) -> Vec<bool> {
    entries
        .iter()
        .map(|entry| filter.allows_entry(entry.entry()))
        .collect()
}
