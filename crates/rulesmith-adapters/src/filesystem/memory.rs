//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use rulesmith_core::{
    application::{ApplicationError, ports::Filesystem},
    error::RulesmithResult,
};

/// In-memory filesystem for testing.
///
/// Behaves like a real tree where it matters to provisioning: a write needs
/// its parent directory, and a directory cannot be created through a file.
/// Paths under a [`deny`](Self::deny)ed prefix fail every mutation.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    denied: Vec<PathBuf>,
    writes: usize,
}

impl MemoryFilesystemInner {
    fn check_denied(&self, path: &Path) -> RulesmithResult<()> {
        match self.denied.iter().find(|prefix| path.starts_with(prefix)) {
            Some(prefix) => Err(failure(
                path,
                format!("permission denied under {}", prefix.display()),
            )),
            None => Ok(()),
        }
    }
}

fn failure(path: &Path, reason: impl Into<String>) -> rulesmith_core::error::RulesmithError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_inner(&self) -> RulesmithResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write_inner(&self) -> RulesmithResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    /// Seed a file (and its ancestors) without counting it as a write.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path, content.into());
        }
        self
    }

    /// Make every mutation under `prefix` fail.
    pub fn deny(self, prefix: impl Into<PathBuf>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.denied.push(prefix.into());
        }
        self
    }

    /// File content (testing helper).
    pub fn file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of successful mutations since construction.
    pub fn write_count(&self) -> usize {
        self.inner.read().map(|inner| inner.writes).unwrap_or(0)
    }

    /// Every file and its content, for comparing whole trees.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.inner
            .read()
            .map(|inner| inner.files.clone())
            .unwrap_or_default()
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> RulesmithResult<()> {
        let mut inner = self.write_inner()?;
        inner.check_denied(path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(failure(
                    path,
                    format!("{} is a file, not a directory", current.display()),
                ));
            }
        }

        insert_ancestors(&mut inner.directories, path);
        inner.writes += 1;
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> RulesmithResult<()> {
        let mut inner = self.write_inner()?;
        inner.check_denied(path)?;

        if inner.directories.contains(path) {
            return Err(failure(path, "is a directory"));
        }

        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if parent_missing {
            return Err(failure(path, "Parent directory does not exist"));
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> RulesmithResult<Option<String>> {
        let inner = self.read_inner()?;
        if inner.directories.contains(path) {
            return Err(failure(path, "is a directory"));
        }
        Ok(inner.files.get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}
