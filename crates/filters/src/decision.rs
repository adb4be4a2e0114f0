use std::fmt;

use crate::debug_filter::{trace_filter_decision, trace_filter_evaluate};
use crate::{FilterAction, FilterRule, PathEntry, Pattern};

/// Inclusion outcome for one path.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Decision {
    /// The path is part of the slice.
    Included,
    /// The path is left out of the slice.
    Excluded,
}

impl Decision {
    /// Reports whether the decision is [`Decision::Included`].
    #[must_use]
    pub const fn is_included(self) -> bool {
        matches!(self, Self::Included)
    }
}

impl From<FilterAction> for Decision {
    fn from(action: FilterAction) -> Self {
        match action {
            FilterAction::Include => Self::Included,
            FilterAction::Exclude => Self::Excluded,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Included => f.write_str("included"),
            Self::Excluded => f.write_str("excluded"),
        }
    }
}

/// Decision for one path together with the rule that produced it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FilterDecision {
    decision: Decision,
    rule_index: Option<usize>,
}

impl FilterDecision {
    pub(crate) const fn matched(action: FilterAction, rule_index: usize) -> Self {
        Self {
            decision: match action {
                FilterAction::Include => Decision::Included,
                FilterAction::Exclude => Decision::Excluded,
            },
            rule_index: Some(rule_index),
        }
    }

    pub(crate) const fn unmatched() -> Self {
        Self {
            decision: Decision::Excluded,
            rule_index: None,
        }
    }

    /// The inclusion outcome.
    #[must_use]
    pub const fn decision(self) -> Decision {
        self.decision
    }

    /// Position of the deciding rule in the flattened list, or `None` when
    /// no rule matched and the default exclusion applied.
    #[must_use]
    pub const fn rule_index(self) -> Option<usize> {
        self.rule_index
    }

    /// Shorthand for `decision().is_included()`.
    #[must_use]
    pub const fn is_included(self) -> bool {
        self.decision.is_included()
    }

    /// Reports whether no rule matched.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.rule_index.is_none()
    }
}

#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub(crate) rule: FilterRule,
    pub(crate) pattern: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FilterSetInner {
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) patterns: Vec<Pattern>,
}

impl FilterSetInner {
    pub(crate) fn decision(&self, entry: &PathEntry) -> FilterDecision {
        let found = self.rules.iter().enumerate().find(|(_, compiled)| {
            let matched = self.patterns[compiled.pattern].matches(entry);
            trace_filter_evaluate(
                entry.relative_path(),
                compiled.rule.pattern(),
                compiled.rule.action() == FilterAction::Include,
                matched,
            );
            matched
        });

        let decision = match found {
            Some((index, compiled)) => FilterDecision::matched(compiled.rule.action(), index),
            None => FilterDecision::unmatched(),
        };

        trace_filter_decision(
            entry.relative_path(),
            decision.is_included(),
            found.map(|(_, compiled)| compiled.rule.pattern()),
        );

        decision
    }
}
