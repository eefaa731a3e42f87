//! On-disk template cache.
//!
//! One JSON document per entry, named `<id>@<revision>.json`, inside the
//! cache directory. Writes go through a temp file so a crash never leaves a
//! truncated entry behind; an unparsable entry is treated as a miss.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use gign_core::{
    application::{
        ApplicationError,
        ports::{CacheKey, CachedTemplate, TemplateCache},
    },
    error::GignResult,
};

#[derive(Debug, Clone)]
pub struct FileTemplateCache {
    dir: PathBuf,
}

impl FileTemplateCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        let revision: String = key
            .revision
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}@{}.json", key.id, revision))
    }
}

fn cache_error(path: &Path, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::CacheError {
        reason: format!("{}: {}", path.display(), e),
    }
}

impl TemplateCache for FileTemplateCache {
    fn get(&self, key: &CacheKey) -> GignResult<Option<CachedTemplate>> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cache_error(&path, e).into()),
        };

        match serde_json::from_str::<CachedTemplate>(&raw) {
            Ok(entry) => {
                debug!(path = %path.display(), "Cache hit");
                Ok(Some(entry))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt cache entry");
                Ok(None)
            }
        }
    }

    fn put(&self, key: &CacheKey, entry: CachedTemplate) -> GignResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| cache_error(&self.dir, e))?;
        let path = self.entry_path(key);

        let json = serde_json::to_vec_pretty(&entry).map_err(|e| cache_error(&path, e))?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| cache_error(&self.dir, e))?;
        tmp.write_all(&json).map_err(|e| cache_error(&path, e))?;
        tmp.persist(&path).map_err(|e| cache_error(&path, e.error))?;

        debug!(path = %path.display(), "Cache entry stored");
        Ok(())
    }
}
