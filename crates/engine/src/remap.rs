//! Extension remapping applied to selected files on materialization.

use std::ffi::{OsStr, OsString};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Error returned by [`ExtensionMap::parse`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RemapError {
    /// A pair does not split into exactly two sides on `:`.
    #[error("malformed extension map pair: {pair}")]
    MalformedPair {
        /// Offending pair, trimmed.
        pair: String,
    },
}

/// Mapping from an old file extension to a new one.
///
/// Extensions are stored with their leading dot.
///
/// ```
/// use engine::ExtensionMap;
/// use std::ffi::OsStr;
///
/// let map = ExtensionMap::parse("go:txt, .md:.markdown").unwrap();
/// assert_eq!(map.remap(OsStr::new("main.go")).unwrap(), "main.txt");
/// assert_eq!(map.remap(OsStr::new("README.md")).unwrap(), "README.markdown");
/// assert!(map.remap(OsStr::new("Makefile")).is_none());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtensionMap {
    extensions: FxHashMap<String, String>,
}

impl ExtensionMap {
    /// Parses comma-separated `old:new` pairs.
    ///
    /// Whitespace around the whole string, each pair and each side is
    /// ignored. A missing leading `.` is added to either side, so an empty
    /// side stands for the bare `.` extension. An empty string yields an
    /// empty map. A later pair for the same old extension replaces an
    /// earlier one.
    pub fn parse(text: &str) -> Result<Self, RemapError> {
        let text = text.trim();
        let mut extensions = FxHashMap::default();
        if text.is_empty() {
            return Ok(Self { extensions });
        }

        for pair in text.split(',') {
            let pair = pair.trim();
            let malformed = || RemapError::MalformedPair {
                pair: pair.to_owned(),
            };

            let mut sides = pair.split(':');
            let (Some(old), Some(new), None) = (sides.next(), sides.next(), sides.next()) else {
                return Err(malformed());
            };
            extensions.insert(normalize(old), normalize(new));
        }

        Ok(Self { extensions })
    }

    /// Returns `true` when no extension is remapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Number of remapped extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns the replacement for `extension` (with its leading dot).
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.extensions.get(extension).map(String::as_str)
    }

    /// Returns the renamed file name, or `None` when the name keeps its
    /// extension.
    ///
    /// The extension is the name's suffix starting at its last `.`, so
    /// `.env` has the extension `.env` and `notes.` has the extension `.`.
    /// A name without a `.` has none.
    #[must_use]
    pub fn remap(&self, file_name: &OsStr) -> Option<OsString> {
        if self.extensions.is_empty() {
            return None;
        }
        let name = file_name.to_str()?;
        let dot = name.rfind('.')?;
        let (stem, extension) = name.split_at(dot);
        let replacement = self.extensions.get(extension)?;

        let mut renamed = OsString::with_capacity(stem.len() + replacement.len());
        renamed.push(stem);
        renamed.push(replacement);
        Some(renamed)
    }
}

fn normalize(side: &str) -> String {
    let side = side.trim();
    if side.starts_with('.') {
        side.to_owned()
    } else {
        format!(".{side}")
    }
}
