//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `gign-adapters` crate provides implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::TechnologyId;
use crate::error::GignResult;

// ── Filesystem ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes; 0 for directories.
    pub size: u64,
}

/// An entry found by [`Filesystem::walk`]. Children of the root have depth 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub entry: DirEntry,
    pub depth: usize,
}

/// Everything a walk saw, plus the directories it could not list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walk {
    pub entries: Vec<WalkEntry>,
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `gign_adapters::filesystem::LocalFilesystem` (production)
/// - `gign_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// List the direct children of a directory. Symlinks are not followed.
    fn read_dir(&self, path: &Path) -> GignResult<Vec<DirEntry>>;

    /// Read a whole file.
    fn read_bytes(&self, path: &Path) -> GignResult<Vec<u8>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Copy `from` to a new file `to`. Returns `false`, touching nothing,
    /// when `to` already exists.
    fn copy_new(&self, from: &Path, to: &Path) -> GignResult<bool>;

    /// Replace `path` with `content` so readers see either the old or the
    /// new file, never a partial one. On error the target is untouched.
    fn write_atomic(&self, path: &Path, content: &str) -> GignResult<()>;

    /// List `root` and every directory down to `max_depth` for which
    /// `descend` holds. Entries are sorted by name within each directory;
    /// the default walks breadth first over [`Filesystem::read_dir`].
    ///
    /// An unlistable root is an error; an unlistable subdirectory is
    /// recorded in [`Walk::unreadable`] and skipped.
    fn walk(
        &self,
        root: &Path,
        max_depth: usize,
        descend: &dyn Fn(&DirEntry) -> bool,
    ) -> GignResult<Walk> {
        let mut walk = Walk::default();
        let mut queue = VecDeque::from([(root.to_path_buf(), 0usize)]);

        while let Some((dir, depth)) = queue.pop_front() {
            let mut children = match self.read_dir(&dir) {
                Ok(children) => children,
                Err(e) if depth == 0 => return Err(e),
                Err(e) => {
                    walk.unreadable.push((dir, e.to_string()));
                    continue;
                }
            };
            children.sort_by(|a, b| a.name.cmp(&b.name));

            for entry in children {
                if entry.kind == EntryKind::Dir && depth < max_depth && descend(&entry) {
                    queue.push_back((entry.path.clone(), depth + 1));
                }
                walk.entries.push(WalkEntry {
                    entry,
                    depth: depth + 1,
                });
            }
        }
        Ok(walk)
    }
}

// ── Remote provider ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("template not found")]
    NotFound,
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for fetching templates from a remote service.
///
/// Implemented by:
/// - `gign_adapters::provider::HttpTemplateProvider` (gitignore.io compatible)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateProvider: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> String;

    /// Fetch the raw template text for one technology.
    async fn fetch(&self, id: &TechnologyId) -> Result<String, ProviderError>;
}

// ── Cache ────────────────────────────────────────────────────────────────────

/// Cache key: template id plus the remote source revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub id: TechnologyId,
    pub revision: String,
}

impl CacheKey {
    pub fn new(id: TechnologyId, revision: impl Into<String>) -> Self {
        Self {
            id,
            revision: revision.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedTemplate {
    pub content: String,
    pub fetched_at: DateTime<Utc>,
}

/// Port for the template cache.
///
/// Adapters synchronize internally; the resolver calls them concurrently.
pub trait TemplateCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> GignResult<Option<CachedTemplate>>;

    fn put(&self, key: &CacheKey, entry: CachedTemplate) -> GignResult<()>;
}

// ── Custom templates ─────────────────────────────────────────────────────────

/// Port for user-authored templates.
///
/// Implemented by:
/// - `gign_adapters::template_store::DirectoryTemplateStore` (`*.gitignore` files)
/// - `gign_adapters::template_store::InMemoryTemplateStore` (testing)
pub trait TemplateStore: Send + Sync {
    /// Get a template by id, if the user defined one.
    fn get(&self, id: &TechnologyId) -> GignResult<Option<String>>;

    /// List all custom template ids, sorted.
    fn list(&self) -> GignResult<Vec<TechnologyId>>;

    /// Insert or replace a template.
    fn insert(&self, id: &TechnologyId, content: &str) -> GignResult<()>;

    /// Remove a template.
    fn remove(&self, id: &TechnologyId) -> GignResult<()>;
}

// ── Bundled templates ────────────────────────────────────────────────────────

/// Port for templates shipped with the binary, used as a last resort.
pub trait FallbackCatalog: Send + Sync {
    fn get(&self, id: &TechnologyId) -> Option<String>;

    fn ids(&self) -> Vec<TechnologyId>;
}

// ── Clock ────────────────────────────────────────────────────────────────────

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
