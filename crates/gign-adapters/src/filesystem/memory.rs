//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use gign_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::GignResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle after giving one to a
/// service.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    unreadable: HashSet<PathBuf>,
    fail_writes: bool,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file (and its parent directories).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            insert_ancestors(&mut inner.directories, parent);
        }
        inner
            .files
            .insert(path.to_path_buf(), content.as_ref().to_vec());
    }

    /// Add a directory (and its parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap();
        insert_ancestors(&mut inner.directories, path.as_ref());
    }

    /// Make listing this directory fail.
    pub fn mark_unreadable(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap();
        inner.unreadable.insert(path.as_ref().to_path_buf());
    }

    /// Make every `write_atomic` fail without touching the target.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.write().unwrap().fail_writes = fail;
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path, what: &str) -> gign_core::error::GignError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn read_dir(&self, path: &Path) -> GignResult<Vec<DirEntry>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.unreadable.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Permission denied".into(),
            }
            .into());
        }
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory"));
        }

        let name_of = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let mut entries: Vec<DirEntry> = inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(path))
            .map(|d| DirEntry {
                path: d.clone(),
                name: name_of(d),
                kind: EntryKind::Dir,
                size: 0,
            })
            .collect();
        entries.extend(
            inner
                .files
                .iter()
                .filter(|(f, _)| f.parent() == Some(path))
                .map(|(f, content)| DirEntry {
                    path: f.clone(),
                    name: name_of(f),
                    kind: EntryKind::File,
                    size: content.len() as u64,
                }),
        );
        Ok(entries)
    }

    fn read_bytes(&self, path: &Path) -> GignResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "File"))
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.read().unwrap().directories.contains(path)
    }

    fn copy_new(&self, from: &Path, to: &Path) -> GignResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "File"))?;
        if inner.files.contains_key(to) {
            return Ok(false);
        }
        inner.files.insert(to.to_path_buf(), content);
        Ok(true)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> GignResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.fail_writes {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No space left on device".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_found(parent, "Parent directory"));
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_direct_children_only() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/a.txt", "a");
        fs.add_file("/p/sub/b.txt", "b");

        let mut names: Vec<_> = fs
            .read_dir(Path::new("/p"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "sub"]);
    }

    #[test]
    fn failed_write_leaves_target_alone() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/.gitignore", "old\n");
        fs.fail_writes(true);

        assert!(fs.write_atomic(Path::new("/p/.gitignore"), "new\n").is_err());
        assert_eq!(fs.read_file("/p/.gitignore").as_deref(), Some("old\n"));
    }

    #[test]
    fn unreadable_directory_errors() {
        let fs = MemoryFilesystem::new();
        fs.add_dir("/p/locked");
        fs.mark_unreadable("/p/locked");
        assert!(fs.read_dir(Path::new("/p/locked")).is_err());
        assert!(fs.read_dir(Path::new("/p")).is_ok());
    }

    #[test]
    fn copy_new_never_replaces() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/a", "first");
        fs.add_file("/p/b", "kept");

        assert!(!fs.copy_new(Path::new("/p/a"), Path::new("/p/b")).unwrap());
        assert_eq!(fs.read_file("/p/b").as_deref(), Some("kept"));
        assert!(fs.copy_new(Path::new("/p/a"), Path::new("/p/c")).unwrap());
        assert_eq!(fs.read_file("/p/c").as_deref(), Some("first"));
    }

    #[test]
    fn default_walk_reports_unreadable_subdirectories() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/p/a/deep/x.txt", "x");
        fs.add_dir("/p/locked");
        fs.mark_unreadable("/p/locked");

        let walk = fs.walk(Path::new("/p"), 1, &|_| true).unwrap();
        let seen: Vec<_> = walk
            .entries
            .iter()
            .map(|w| (w.entry.name.as_str(), w.depth))
            .collect();
        assert_eq!(seen, vec![("a", 1), ("locked", 1), ("deep", 2)]);
        assert_eq!(walk.unreadable.len(), 1);
        assert_eq!(walk.unreadable[0].0, Path::new("/p/locked"));
    }
}
