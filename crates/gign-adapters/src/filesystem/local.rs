//! Local filesystem adapter: `std::fs` for single entries, `walkdir` for
//! tree walks and `tempfile` for atomic writes.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

use gign_core::{
    application::ports::{DirEntry, EntryKind, Filesystem, Walk, WalkEntry},
    error::GignResult,
};

use super::map_io_error;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_dir(&self, path: &Path) -> GignResult<Vec<DirEntry>> {
        let reader = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "inspect entry"))?;

            let (kind, size) = if file_type.is_dir() {
                (EntryKind::Dir, 0)
            } else if file_type.is_file() {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                (EntryKind::File, size)
            } else {
                (EntryKind::Other, 0)
            };

            entries.push(DirEntry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
                size,
            });
        }
        Ok(entries)
    }

    fn read_bytes(&self, path: &Path) -> GignResult<Vec<u8>> {
        fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy_new(&self, from: &Path, to: &Path) -> GignResult<bool> {
        let mut source = fs::File::open(from).map_err(|e| map_io_error(from, e, "open file"))?;
        let mut dest = match OpenOptions::new().write(true).create_new(true).open(to) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(map_io_error(to, e, "create file")),
        };

        if let Err(e) = io::copy(&mut source, &mut dest).and_then(|_| dest.sync_all()) {
            drop(dest);
            let _ = fs::remove_file(to);
            return Err(map_io_error(to, e, "copy file"));
        }
        Ok(true)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> GignResult<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // Dropping `tmp` on any early return removes the temp file.
        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| map_io_error(dir, e, "create temp file"))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| map_io_error(tmp.path(), e, "write temp file"))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| map_io_error(tmp.path(), e, "sync temp file"))?;

        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| map_io_error(tmp.path(), e, "copy permissions"))?;
        }

        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        debug!(path = %path.display(), "File replaced atomically");
        Ok(())
    }

    fn walk(
        &self,
        root: &Path,
        max_depth: usize,
        descend: &dyn Fn(&DirEntry) -> bool,
    ) -> GignResult<Walk> {
        fs::read_dir(root).map_err(|e| map_io_error(root, e, "read directory"))?;

        let mut walk = Walk::default();
        let mut entries = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth + 1)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = entries.next() {
            let found = match next {
                Ok(found) => found,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    debug!(path = %path.display(), error = %e, "Walk error");
                    walk.unreadable.push((path, e.to_string()));
                    continue;
                }
            };

            let file_type = found.file_type();
            let (kind, size) = if file_type.is_dir() {
                (EntryKind::Dir, 0)
            } else if file_type.is_file() {
                (EntryKind::File, found.metadata().map(|m| m.len()).unwrap_or(0))
            } else {
                (EntryKind::Other, 0)
            };
            let entry = DirEntry {
                path: found.path().to_path_buf(),
                name: found.file_name().to_string_lossy().into_owned(),
                kind,
                size,
            };

            if kind == EntryKind::Dir && found.depth() <= max_depth && !descend(&entry) {
                entries.skip_current_dir();
            }
            walk.entries.push(WalkEntry {
                depth: found.depth(),
                entry,
            });
        }
        Ok(walk)
    }
}
