//! crates/logging/src/message.rs
//! User-facing diagnostics.

use std::borrow::Cow;
use std::fmt;

/// Name prefixed to warnings and errors.
pub const PROGRAM_NAME: &str = "repo-slice";

/// Severity of a [`Message`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    /// Plain progress or result text, printed without a prefix.
    Info,
    /// Something the user should know about that did not stop the run.
    Warning,
    /// The run failed.
    Error,
}

impl Severity {
    /// Label used in the rendered prefix, if any.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Warning => Some("warning"),
            Self::Error => Some("error"),
        }
    }
}

/// One line of output addressed to the user.
///
/// ```
/// use logging::Message;
///
/// assert_eq!(Message::warning("empty selection").to_string(), "repo-slice: warning: empty selection");
/// assert_eq!(Message::info("done").to_string(), "done");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    severity: Severity,
    text: Cow<'static, str>,
}

impl Message {
    /// Creates a message with an explicit severity.
    #[must_use]
    pub fn new(severity: Severity, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Creates an informational message.
    #[must_use]
    pub fn info(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Info, text)
    }

    /// Creates a warning.
    #[must_use]
    pub fn warning(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Warning, text)
    }

    /// Creates an error.
    #[must_use]
    pub fn error(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Severity::Error, text)
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the text without prefix.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity.label() {
            Some(label) => write!(f, "{PROGRAM_NAME}: {label}: {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}
