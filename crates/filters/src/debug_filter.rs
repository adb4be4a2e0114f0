//! Structured tracing for manifest loading and rule evaluation.
//!
//! Every function is compiled to an inline no-op unless the `tracing`
//! feature is enabled, so the hot decision loop pays nothing when nobody is
//! listening.

#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "slice::filter";

#[cfg(feature = "tracing")]
const MANIFEST_TARGET: &str = "slice::manifest";

/// Traces a rule read from a manifest.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_rule_added(pattern: &str, is_include: bool, is_dir_only: bool) {
    tracing::trace!(
        target: MANIFEST_TARGET,
        pattern = %pattern,
        is_include = is_include,
        is_dir_only = is_dir_only,
        "rule_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_rule_added(_pattern: &str, _is_include: bool, _is_dir_only: bool) {}

/// Traces a manifest being loaded and parsed.
///
/// `cached` is `true` when the parsed items were served from a
/// [`ManifestCache`](crate::ManifestCache) instead of being read again.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_manifest_load(path: &str, item_count: usize, cached: bool) {
    tracing::debug!(
        target: MANIFEST_TARGET,
        path = %path,
        item_count = item_count,
        cached = cached,
        "manifest_load"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_manifest_load(_path: &str, _item_count: usize, _cached: bool) {}

/// Traces one rule being tested against a path.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_evaluate(path: &str, rule_pattern: &str, is_include: bool, matched: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        rule_pattern = %rule_pattern,
        is_include = is_include,
        matched = matched,
        "filter_evaluate"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_evaluate(_path: &str, _rule_pattern: &str, _is_include: bool, _matched: bool) {}

/// Traces the final decision for a path.
///
/// `matching_pattern` is `None` when the path fell through to the default
/// exclusion.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_decision(path: &str, included: bool, matching_pattern: Option<&str>) {
    tracing::debug!(
        target: FILTER_TARGET,
        path = %path,
        included = included,
        matching_pattern = ?matching_pattern,
        "filter_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_decision(_path: &str, _included: bool, _matching_pattern: Option<&str>) {}

/// Traces aggregate counts for a completed selection pass.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_summary(total_evaluated: usize, total_included: usize, total_excluded: usize) {
    tracing::info!(
        target: FILTER_TARGET,
        total_evaluated = total_evaluated,
        total_included = total_included,
        total_excluded = total_excluded,
        "filter_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_summary(
    _total_evaluated: usize,
    _total_included: usize,
    _total_excluded: usize,
) {
}

/// Aggregates decision counts across one selection pass.
///
/// ```
/// use filters::debug_filter::FilterTracer;
///
/// let mut tracer = FilterTracer::new();
/// tracer.record_evaluation(true);
/// tracer.record_evaluation(false);
/// tracer.summary();
/// assert_eq!(tracer.total_evaluated(), 2);
/// assert_eq!(tracer.total_included(), 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterTracer {
    total_evaluated: usize,
    total_included: usize,
    total_excluded: usize,
}

impl FilterTracer {
    /// Creates a tracer with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_evaluated: 0,
            total_included: 0,
            total_excluded: 0,
        }
    }

    /// Records one decision.
    pub fn record_evaluation(&mut self, included: bool) {
        self.total_evaluated += 1;
        if included {
            self.total_included += 1;
        } else {
            self.total_excluded += 1;
        }
    }

    /// Emits a summary event with the accumulated counts.
    pub fn summary(&self) {
        trace_filter_summary(
            self.total_evaluated,
            self.total_included,
            self.total_excluded,
        );
    }

    /// Returns the number of paths evaluated.
    #[must_use]
    pub const fn total_evaluated(&self) -> usize {
        self.total_evaluated
    }

    /// Returns the number of paths included.
    #[must_use]
    pub const fn total_included(&self) -> usize {
        self.total_included
    }

    /// Returns the number of paths excluded.
    #[must_use]
    pub const fn total_excluded(&self) -> usize {
        self.total_excluded
    }
}
