//! Mock system implementation for testing

use super::{System, WalkEntry};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// Clones share the same state, so a `MockGitRunner` holding a clone can
/// simulate what `git` would have written to disk.
///
/// # Example
/// ```
/// use seqfetch::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/work/output/seq/A000045.seq", b"%I A000045").unwrap()
///     .with_dir("/work/empty").unwrap();
///
/// assert!(system.try_exists(Path::new("/work/output/seq")).unwrap());
/// assert!(system.is_dir(Path::new("/work/empty")));
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl MockSystem {
    /// Create a new `MockSystem` containing only the root directory
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/")]),
            })),
        }
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if let Some(parent) = path_buf.parent() {
            Self::ensure_parent_dirs(&mut state.dirs, parent);
        }

        state.files.insert(path_buf, contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// Add a directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        self.create_dir_all(path.as_ref())?;
        Ok(self)
    }

    /// Number of files currently stored under `path`
    #[must_use]
    #[inline]
    pub fn file_count_under(&self, path: &Path) -> usize {
        self.state
            .read()
            .map_or(0, |state| {
                state.files.keys().filter(|p| p.starts_with(path)).count()
            })
    }

    /// Raw bytes of a stored file
    #[must_use]
    #[inline]
    pub fn file_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.files.get(path).cloned())
    }

    #[inline]
    fn ensure_parent_dirs(dirs: &mut HashSet<PathBuf>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor == Path::new("") {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn try_exists(&self, path: &Path) -> io::Result<bool> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(state.files.contains_key(path) || state.dirs.contains(path))
    }

    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.dirs.contains(path))
    }

    #[inline]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, path);
        drop(state);
        Ok(())
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = state.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        let result = bytes.clone();
        drop(state);
        String::from_utf8(result)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if let Some(parent) = path.parent()
            && parent != Path::new("")
            && !state.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }

        state.files.insert(path.to_path_buf(), contents.to_vec());
        drop(state);
        Ok(())
    }

    #[inline]
    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        let mut entries: Vec<WalkEntry> = state
            .dirs
            .iter()
            .filter(|dir| dir.starts_with(path) && dir.as_path() != path)
            .map(|dir| WalkEntry {
                path: dir.clone(),
                is_file: false,
                is_dir: true,
            })
            .chain(
                state
                    .files
                    .keys()
                    .filter(|file| file.starts_with(path))
                    .map(|file| WalkEntry {
                        path: file.clone(),
                        is_file: true,
                        is_dir: false,
                    }),
            )
            .collect();
        drop(state);

        // Sort entries by path for deterministic output
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_parent_dirs() {
        let system = MockSystem::new()
            .with_file("/a/b/c.txt", b"hello")
            .unwrap();

        assert!(system.is_dir(Path::new("/a")));
        assert!(system.is_dir(Path::new("/a/b")));
        assert!(system.try_exists(Path::new("/a/b/c.txt")).unwrap());
        assert!(!system.is_dir(Path::new("/a/b/c.txt")));
        assert_eq!(system.read_to_string(Path::new("/a/b/c.txt")).unwrap(), "hello");
    }

    #[test]
    fn write_requires_parent() {
        let system = MockSystem::new();
        assert!(system.write(Path::new("/missing/file"), b"x").is_err());
        system.write(Path::new("/file"), b"x").unwrap();
        assert_eq!(system.file_bytes(Path::new("/file")), Some(b"x".to_vec()));
    }

    #[test]
    fn walk_dir_lists_nested_entries_sorted() {
        let system = MockSystem::new()
            .with_file("/root/seq/A000002.seq", b"2")
            .unwrap()
            .with_file("/root/seq/A000001.seq", b"1")
            .unwrap()
            .with_file("/other/file", b"x")
            .unwrap();

        let entries = system.walk_dir(Path::new("/root")).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/root/seq"),
                PathBuf::from("/root/seq/A000001.seq"),
                PathBuf::from("/root/seq/A000002.seq"),
            ]
        );
        assert_eq!(system.file_count_under(Path::new("/root")), 2);
    }

    #[test]
    fn clones_share_state() {
        let system = MockSystem::new();
        let other = system.clone();
        other.create_dir_all(Path::new("/shared/dir")).unwrap();
        assert!(system.is_dir(Path::new("/shared/dir")));
    }
}
