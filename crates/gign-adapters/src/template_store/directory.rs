//! Directory-backed custom template store.
//!
//! Each template is a `<name>.gitignore` file directly inside the store
//! directory. The directory is created on first insert.
//!
//! ```text
//! ~/.config/gign/templates/
//! ├── my-stack.gitignore
//! └── team_rules.gitignore
//! ```

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use gign_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TechnologyId,
    error::GignResult,
};

use crate::filesystem::map_io_error;

const EXTENSION: &str = "gitignore";

#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &TechnologyId) -> PathBuf {
        self.root.join(format!("{id}.{EXTENSION}"))
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn get(&self, id: &TechnologyId) -> GignResult<Option<String>> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "Custom template found");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(&path, e, "read template")),
        }
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self) -> GignResult<Vec<TechnologyId>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable template entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match TechnologyId::parse(stem) {
                Ok(id) => ids.push(id),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping template with invalid name"),
            }
        }

        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn insert(&self, id: &TechnologyId, content: &str) -> GignResult<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| map_io_error(&self.root, e, "create template directory"))?;
        let path = self.path_for(id);
        fs::write(&path, content).map_err(|e| map_io_error(&path, e, "write template"))
    }

    fn remove(&self, id: &TechnologyId) -> GignResult<()> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ApplicationError::TemplateNotFound {
                name: id.to_string(),
            }
            .into()),
            Err(e) => Err(map_io_error(&path, e, "remove template")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TechnologyId {
        TechnologyId::parse(s).unwrap()
    }

    #[test]
    fn insert_list_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryTemplateStore::new(dir.path().join("templates"));

        assert!(store.list().unwrap().is_empty());

        store.insert(&tid("team"), "secrets/\n").unwrap();
        store.insert(&tid("alpha"), "*.tmp\n").unwrap();

        assert_eq!(store.list().unwrap(), vec![tid("alpha"), tid("team")]);
        assert_eq!(store.get(&tid("team")).unwrap().as_deref(), Some("secrets/\n"));

        store.remove(&tid("team")).unwrap();
        assert_eq!(store.get(&tid("team")).unwrap(), None);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryTemplateStore::new(dir.path());

        let err = store.remove(&tid("ghost")).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn list_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("Bad Name.gitignore"), "x").unwrap();
        fs::write(dir.path().join("ok.gitignore"), "x").unwrap();

        let store = DirectoryTemplateStore::new(dir.path());
        assert_eq!(store.list().unwrap(), vec![tid("ok")]);
    }
}
