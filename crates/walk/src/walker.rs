use crate::builder::WalkOptions;
use crate::entry::WalkEntry;
use crate::error::WalkError;
use logging::trace_walk;
use rustc_hash::FxHashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Depth-first pre-order iterator over a source tree.
///
/// Siblings are sorted by name before any of them is yielded. The first error
/// ends the walk.
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    follow_symlinks: bool,
    pending_root: Option<WalkEntry>,
    stack: Vec<DirectoryState>,
    ancestors: FxHashSet<PathBuf>,
    finished: bool,
}

impl Walker {
    pub(crate) fn new(root: PathBuf, options: WalkOptions) -> Result<Self, WalkError> {
        let WalkOptions {
            follow_symlinks,
            skip_root,
        } = options;
        let root = absolutize(root)?;
        trace_walk!(level: INFO, "walking source tree {}", root.display());

        let metadata = fs::symlink_metadata(&root)
            .map_err(|error| WalkError::root_metadata(root.clone(), error))?;

        let mut walker = Self {
            root: root.clone(),
            follow_symlinks,
            pending_root: None,
            stack: Vec::new(),
            ancestors: FxHashSet::default(),
            finished: false,
        };

        let file_type = metadata.file_type();
        let mut descended = false;
        if file_type.is_dir() {
            descended = walker.push_directory(root.clone(), PathBuf::new(), 0)?;
        } else if file_type.is_symlink() && follow_symlinks {
            let target =
                fs::metadata(&root).map_err(|error| WalkError::metadata(root.clone(), error))?;
            if target.is_dir() {
                descended = walker.push_directory(root.clone(), PathBuf::new(), 0)?;
            }
        }

        if !skip_root {
            walker.pending_root = Some(WalkEntry {
                full_path: root,
                relative_path: PathBuf::new(),
                metadata,
                depth: 0,
                is_root: true,
                descended: descended && file_type.is_symlink(),
            });
        }

        Ok(walker)
    }

    /// Root the walker was created for, made absolute.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Pushes a directory onto the stack unless its canonical path is one of
    /// the directories currently being walked. Returns whether it was pushed.
    ///
    /// Only the ancestor chain is checked: a directory reached through a
    /// sibling link is still entered under its own path.
    fn push_directory(
        &mut self,
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
    ) -> Result<bool, WalkError> {
        let canonical = fs::canonicalize(&fs_path)
            .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
        if self.ancestors.contains(&canonical) {
            trace_walk!("not entering {}: already on the current path", fs_path.display());
            return Ok(false);
        }

        let state = DirectoryState::read(fs_path, canonical.clone(), relative_prefix, depth)?;
        self.ancestors.insert(canonical);
        self.stack.push(state);
        Ok(true)
    }

    fn pop_directory(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.ancestors.remove(&state.canonical);
        }
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<WalkEntry, WalkError> {
        trace_walk!(level: TRACE, "entry {}", relative_path.display());

        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;
        let file_type = metadata.file_type();

        let mut descended = false;
        if file_type.is_dir() {
            self.push_directory(full_path.clone(), relative_path.clone(), depth)?;
        } else if file_type.is_symlink() && self.follow_symlinks {
            // A dangling link is reported as a plain symlink.
            if let Ok(target) = fs::metadata(&full_path)
                && target.is_dir()
            {
                descended = self.push_directory(full_path.clone(), relative_path.clone(), depth)?;
            }
        }

        Ok(WalkEntry {
            full_path,
            relative_path,
            metadata,
            depth,
            is_root: false,
            descended,
        })
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(root) = self.pending_root.take() {
            return Some(Ok(root));
        }

        loop {
            let state = self.stack.last_mut()?;
            let Some(name) = state.next_name() else {
                self.pop_directory();
                continue;
            };

            let full_path = state.fs_path.join(&name);
            let relative_path = state.relative_prefix.join(&name);
            let depth = state.depth + 1;

            return match self.prepare_entry(full_path, relative_path, depth) {
                Ok(entry) => Some(Ok(entry)),
                Err(error) => {
                    self.finished = true;
                    Some(Err(error))
                }
            };
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    canonical: PathBuf,
    relative_prefix: PathBuf,
    names: std::vec::IntoIter<OsString>,
    depth: usize,
}

impl DirectoryState {
    fn read(
        fs_path: PathBuf,
        canonical: PathBuf,
        relative_prefix: PathBuf,
        depth: usize,
    ) -> Result<Self, WalkError> {
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| WalkError::read_dir(fs_path.clone(), error))?;
        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|error| WalkError::read_dir_entry(fs_path.clone(), error))?;
            names.push(entry.file_name());
        }
        names.sort();

        trace_walk!("entering {} ({} entries)", fs_path.display(), names.len());

        Ok(Self {
            fs_path,
            canonical,
            relative_prefix,
            names: names.into_iter(),
            depth,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        self.names.next()
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, WalkError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = env::current_dir()
            .map_err(|error| WalkError::canonicalize(PathBuf::from("."), error))?;
        Ok(cwd.join(path))
    }
}
