use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{Clock, Filesystem};
use crate::application::report::WriteOutcome;
use crate::domain::MergedDocument;
use crate::error::{GignError, GignResult};

/// Numbered names tried after the plain timestamp is taken.
const MAX_BACKUP_SUFFIX: usize = 99;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub backup: bool,
    pub dry_run: bool,
}

/// Serializes a merged document and replaces the target atomically.
#[derive(Clone)]
pub struct OutputWriter {
    filesystem: Arc<dyn Filesystem>,
    clock: Arc<dyn Clock>,
}

impl OutputWriter {
    pub fn new(filesystem: Arc<dyn Filesystem>, clock: Arc<dyn Clock>) -> Self {
        Self { filesystem, clock }
    }

    /// `<target>.<YYYYmmddTHHMMSS>.bak` next to the target, or
    /// `<target>.<YYYYmmddTHHMMSS>.<n>.bak` for `n > 0`.
    pub fn backup_path(target: &Path, at: DateTime<Utc>, n: usize) -> PathBuf {
        let mut name = target
            .file_name()
            .map(|f| f.to_os_string())
            .unwrap_or_default();
        let stamp = at.format("%Y%m%dT%H%M%S");
        if n == 0 {
            name.push(format!(".{stamp}.bak"));
        } else {
            name.push(format!(".{stamp}.{n}.bak"));
        }
        target.with_file_name(name)
    }

    /// Copy the target to the first free backup name. Existing backups are
    /// never replaced.
    fn backup(&self, target: &Path) -> GignResult<PathBuf> {
        let at = self.clock.now();
        for n in 0..=MAX_BACKUP_SUFFIX {
            let path = Self::backup_path(target, at, n);
            if self.filesystem.copy_new(target, &path)? {
                return Ok(path);
            }
            debug!(path = %path.display(), "Backup name taken");
        }
        Err(GignError::Application(ApplicationError::FilesystemError {
            path: target.to_path_buf(),
            reason: format!("backup names up to suffix {MAX_BACKUP_SUFFIX} are all taken"),
        }))
    }

    #[instrument(skip(self, document), fields(target = %target.display()))]
    pub fn write(
        &self,
        target: &Path,
        document: &MergedDocument,
        options: WriteOptions,
    ) -> GignResult<WriteOutcome> {
        if options.dry_run {
            return Ok(WriteOutcome::Skipped);
        }

        let text = document.to_text();
        if text.is_empty() {
            info!("Merged document is empty; nothing written");
            return Ok(WriteOutcome::Empty);
        }

        let failure = |e: GignError| {
            GignError::Application(ApplicationError::WriteFailure {
                path: target.to_path_buf(),
                reason: e.to_string(),
            })
        };

        let backup = if options.backup && self.filesystem.exists(target) {
            let path = self.backup(target).map_err(failure)?;
            info!(backup = %path.display(), "Backup created");
            Some(path)
        } else {
            None
        };

        self.filesystem.write_atomic(target, &text).map_err(failure)?;
        info!(bytes = text.len(), "Ignore file written");

        Ok(WriteOutcome::Written {
            path: target.to_path_buf(),
            backup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn backup_path_appends_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            OutputWriter::backup_path(Path::new("/repo/.gitignore"), at, 0),
            PathBuf::from("/repo/.gitignore.20260102T030405.bak")
        );
        assert_eq!(
            OutputWriter::backup_path(Path::new("/repo/.gitignore"), at, 2),
            PathBuf::from("/repo/.gitignore.20260102T030405.2.bak")
        );
    }
}
