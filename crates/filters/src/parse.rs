//! Line-oriented manifest grammar.
//!
//! ```text
//! # comment
//! . base.manifest     inherit rules from another manifest
//! + /src/**           include
//! - *                 exclude
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::debug_filter::trace_filter_rule_added;
use crate::error::{ParseError, ParseErrorReason};
use crate::rule::RuleOrigin;
use crate::{FilterAction, FilterRule};

const INHERIT_PREFIX: char = '.';
const COMMENT_PREFIX: char = '#';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reference to another manifest whose rules are spliced in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InheritDirective {
    path: PathBuf,
    origin: RuleOrigin,
}

impl InheritDirective {
    /// Path exactly as written; relative paths are resolved against the
    /// directory of the manifest holding the directive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the directive was declared.
    #[must_use]
    pub const fn origin(&self) -> &RuleOrigin {
        &self.origin
    }
}

/// One meaningful line of a manifest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ManifestItem {
    /// An include or exclude rule.
    Rule(FilterRule),
    /// A `. <path>` directive.
    Inherit(InheritDirective),
}

/// Parses manifest text into its ordered rules and inherit directives.
///
/// `file` is only used to label rule origins and errors; nothing is read from
/// disk. Blank lines and `#` comments are skipped. Every other line must be a
/// directive character (`+`, `-` or `.`) followed by whitespace and a
/// non-empty argument.
///
/// # Examples
///
/// ```
/// use filters::{ManifestItem, parse_manifest};
/// use std::path::Path;
///
/// let items = parse_manifest("# docs only\n+ /docs/\n- *\n", Path::new("m.txt")).unwrap();
/// assert_eq!(items.len(), 2);
/// assert!(matches!(&items[0], ManifestItem::Rule(rule) if rule.pattern() == "/docs/"));
/// ```
pub fn parse_manifest(text: &str, file: &Path) -> Result<Vec<ManifestItem>, ParseError> {
    let shared: Arc<Path> = Arc::from(file);
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut items = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let (directive, argument) = split_directive(trimmed)
            .map_err(|reason| ParseError::new(file, line, reason))?;
        let origin = RuleOrigin::shared(Arc::clone(&shared), line);

        match FilterAction::from_prefix(directive) {
            Some(action) => {
                trace_filter_rule_added(
                    argument,
                    action == FilterAction::Include,
                    argument.ends_with('/'),
                );
                items.push(ManifestItem::Rule(
                    FilterRule::new(action, argument).with_origin(origin),
                ));
            }
            None => items.push(ManifestItem::Inherit(InheritDirective {
                path: PathBuf::from(argument),
                origin,
            })),
        }
    }

    Ok(items)
}

fn split_directive(line: &str) -> Result<(char, &str), ParseErrorReason> {
    let mut chars = line.chars();
    let Some(directive) = chars.next() else {
        return Err(ParseErrorReason::UnknownDirective(String::new()));
    };
    if directive != INHERIT_PREFIX && FilterAction::from_prefix(directive).is_none() {
        return Err(ParseErrorReason::UnknownDirective(line.to_owned()));
    }

    let rest = chars.as_str();
    if rest.is_empty() {
        return Err(ParseErrorReason::MissingArgument(directive));
    }
    if !rest.starts_with(char::is_whitespace) {
        return Err(ParseErrorReason::MissingSeparator(directive));
    }

    let argument = rest.trim_start();
    if argument.is_empty() {
        return Err(ParseErrorReason::MissingArgument(directive));
    }
    Ok((directive, argument))
}
