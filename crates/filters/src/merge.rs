//! Inheritance expansion for manifests.
//!
//! Expansion is depth-first and pre-order: the rules of an inherited manifest
//! are spliced in at the position of its `. <path>` directive, before the
//! remaining lines of the inheriting manifest. The order of the flattened
//! list is therefore exactly the order a reader encounters rules when
//! following directives as they appear.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::debug_filter::trace_manifest_load;
use crate::error::ResolveError;
use crate::parse::{InheritDirective, ManifestItem, parse_manifest};
use crate::FilterRule;

/// Read access to manifest text.
///
/// Implementations decide what a path means: [`FsLoader`] reads the live
/// filesystem while [`MemoryLoader`] serves fixed text for tests.
pub trait ManifestLoader {
    /// Returns the full text of the manifest at `path`.
    ///
    /// A missing manifest must be reported with [`io::ErrorKind::NotFound`].
    fn load_text(&self, path: &Path) -> io::Result<String>;

    /// Returns the identity used for cycle detection and caching.
    ///
    /// Two spellings of the same manifest must canonicalize to the same path.
    /// A missing manifest must be reported with [`io::ErrorKind::NotFound`].
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

impl<L: ManifestLoader + ?Sized> ManifestLoader for &L {
    fn load_text(&self, path: &Path) -> io::Result<String> {
        (**self).load_text(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }
}

/// Loads manifests from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl ManifestLoader for FsLoader {
    fn load_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

/// In-memory manifest store keyed by lexically normalized path.
///
/// ```
/// use filters::{MemoryLoader, resolve_manifest};
/// use std::path::Path;
///
/// let loader = MemoryLoader::new()
///     .with_file("/m/base", "+ /y\n")
///     .with_file("/m/child", ". base\n+ /x\n- *\n");
/// let rules = resolve_manifest(Path::new("/m/child"), &loader).unwrap();
/// let rendered: Vec<String> = rules.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["+ /y", "+ /x", "- *"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
    loads: Cell<usize>,
}

impl MemoryLoader {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a manifest and returns the store.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Adds or replaces a manifest.
    pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        self.files
            .insert(normalize_lexically(path.as_ref()), text.into());
    }

    /// Number of successful [`load_text`](ManifestLoader::load_text) calls so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}

impl ManifestLoader for MemoryLoader {
    fn load_text(&self, path: &Path) -> io::Result<String> {
        let text = self
            .files
            .get(&normalize_lexically(path))
            .cloned()
            .ok_or_else(|| not_found(path))?;
        self.loads.set(self.loads.get() + 1);
        Ok(text)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let normalized = normalize_lexically(path);
        if self.files.contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(not_found(path))
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no manifest registered at '{}'", path.display()),
    )
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Read-through cache of parsed manifests keyed by canonical path.
///
/// Passing the same cache to several resolutions avoids re-reading a base
/// manifest shared by many children. Cached entries never change the result
/// of a resolution as long as the underlying text does not change.
#[derive(Debug, Default)]
pub struct ManifestCache {
    entries: FxHashMap<PathBuf, Arc<[ManifestItem]>>,
}

impl ManifestCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct manifests held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports whether the manifest with this canonical path is cached.
    #[must_use]
    pub fn contains(&self, canonical: &Path) -> bool {
        self.entries.contains_key(canonical)
    }

    /// Drops every cached manifest.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Expands `root` and everything it inherits into one ordered rule list.
///
/// # Errors
///
/// - [`ResolveError::ManifestNotFound`] when `root` does not exist.
/// - [`ResolveError::MissingInheritedFile`] when a directive points nowhere.
/// - [`ResolveError::Cycle`] when a manifest (transitively) inherits itself.
/// - [`ResolveError::Parse`] for malformed lines, [`ResolveError::Load`] for
///   other read failures.
pub fn resolve_manifest<L>(root: &Path, loader: &L) -> Result<Vec<FilterRule>, ResolveError>
where
    L: ManifestLoader + ?Sized,
{
    let mut cache = ManifestCache::new();
    resolve_manifest_with_cache(root, loader, &mut cache)
}

/// Same as [`resolve_manifest`] but reuses parsed manifests from `cache` and
/// stores newly parsed ones in it.
pub fn resolve_manifest_with_cache<L>(
    root: &Path,
    loader: &L,
    cache: &mut ManifestCache,
) -> Result<Vec<FilterRule>, ResolveError>
where
    L: ManifestLoader + ?Sized,
{
    let mut resolver = Resolver {
        loader,
        cache,
        stack: Vec::new(),
    };
    let mut rules = Vec::new();
    resolver.expand(root, None, &mut rules)?;
    Ok(rules)
}

/// Reads and expands a manifest from the local filesystem.
pub fn read_manifest(path: &Path) -> Result<Vec<FilterRule>, ResolveError> {
    resolve_manifest(path, &FsLoader)
}

struct Resolver<'a, L: ?Sized> {
    loader: &'a L,
    cache: &'a mut ManifestCache,
    stack: Vec<PathBuf>,
}

impl<L: ManifestLoader + ?Sized> Resolver<'_, L> {
    fn expand(
        &mut self,
        path: &Path,
        referrer: Option<&InheritDirective>,
        out: &mut Vec<FilterRule>,
    ) -> Result<(), ResolveError> {
        let canonical = self
            .loader
            .canonicalize(path)
            .map_err(|error| load_error(path, referrer, error))?;

        if self.stack.contains(&canonical) {
            let mut chain = self.stack.clone();
            chain.push(canonical);
            return Err(ResolveError::Cycle { chain });
        }

        let items = self.items(&canonical, referrer)?;
        // Directives are relative to the manifest as named, not its link target.
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();

        self.stack.push(canonical);
        for item in items.iter() {
            match item {
                ManifestItem::Rule(rule) => out.push(rule.clone()),
                ManifestItem::Inherit(directive) => {
                    let target = base.join(directive.path());
                    self.expand(&target, Some(directive), out)?;
                }
            }
        }
        self.stack.pop();
        Ok(())
    }

    fn items(
        &mut self,
        canonical: &Path,
        referrer: Option<&InheritDirective>,
    ) -> Result<Arc<[ManifestItem]>, ResolveError> {
        if let Some(items) = self.cache.entries.get(canonical) {
            trace_manifest_load(&canonical.display().to_string(), items.len(), true);
            return Ok(Arc::clone(items));
        }

        let text = self
            .loader
            .load_text(canonical)
            .map_err(|error| load_error(canonical, referrer, error))?;
        let items: Arc<[ManifestItem]> = parse_manifest(&text, canonical)?.into();
        trace_manifest_load(&canonical.display().to_string(), items.len(), false);
        self.cache
            .entries
            .insert(canonical.to_path_buf(), Arc::clone(&items));
        Ok(items)
    }
}

fn load_error(path: &Path, referrer: Option<&InheritDirective>, error: io::Error) -> ResolveError {
    if error.kind() != io::ErrorKind::NotFound {
        return ResolveError::Load {
            path: path.to_path_buf(),
            source: error,
        };
    }
    match referrer {
        Some(directive) => ResolveError::MissingInheritedFile {
            path: path.to_path_buf(),
            referenced_by: directive.origin().file().to_path_buf(),
            line: directive.origin().line(),
        },
        None => ResolveError::ManifestNotFound {
            path: path.to_path_buf(),
        },
    }
}
