//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole pipeline:
//! 1. Read the existing ignore file (it becomes the `custom` group)
//! 2. Detect technologies, unless they were given explicitly
//! 3. Resolve templates concurrently
//! 4. Merge
//! 5. Write atomically, with optional backup
//!
//! Per-technology problems are reported as warnings; only an unreadable
//! existing file, an unreadable root or a failed write stop the run.
//! Filesystem work runs on the blocking pool so the caller can cancel the
//! future at any await point.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::application::ports::Filesystem;
use crate::application::report::{GenerationReport, RunWarning};
use crate::application::services::blocking::run_blocking;
use crate::application::services::detection_service::TechnologyDetector;
use crate::application::services::output_writer::{OutputWriter, WriteOptions};
use crate::application::services::template_resolver::TemplateResolver;
use crate::domain::{MergedDocument, TechnologyId, recommend, security_template};
use crate::error::{GignError, GignResult};

/// Default name of the generated file.
pub const GITIGNORE: &str = ".gitignore";

#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Project root to scan.
    pub root: PathBuf,
    /// Target file; defaults to `<root>/.gitignore`.
    pub output: Option<PathBuf>,
    /// Explicit technologies; detection is skipped when non-empty.
    pub technologies: Vec<TechnologyId>,
    pub backup: bool,
    pub dry_run: bool,
    /// Ignore the existing file's content (it is still backed up).
    pub fresh: bool,
    /// Append the `security` group after the resolved templates.
    pub security: bool,
}

impl GenerateRequest {
    pub fn target(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.root.join(GITIGNORE))
    }
}

pub struct GenerateService {
    filesystem: Arc<dyn Filesystem>,
    detector: TechnologyDetector,
    resolver: TemplateResolver,
    writer: OutputWriter,
}

impl GenerateService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        detector: TechnologyDetector,
        resolver: TemplateResolver,
        writer: OutputWriter,
    ) -> Self {
        Self {
            filesystem,
            detector,
            resolver,
            writer,
        }
    }

    pub fn detector(&self) -> &TechnologyDetector {
        &self.detector
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    #[instrument(skip_all, fields(root = %request.root.display()))]
    pub async fn generate(&self, request: &GenerateRequest) -> GignResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        let target = request.target();
        info!(%run_id, target = %target.display(), "Generating ignore file");

        let existing = if request.fresh {
            None
        } else {
            let filesystem = Arc::clone(&self.filesystem);
            let path = target.clone();
            run_blocking(move || read_existing(filesystem.as_ref(), &path)).await?
        };

        let mut warnings: Vec<RunWarning> = Vec::new();
        let (technologies, detection) = if request.technologies.is_empty() {
            let report = self.detector.scan(&request.root).await?;
            warnings.extend(report.warnings.iter().cloned());
            (report.technologies(), Some(report))
        } else {
            let mut explicit: Vec<TechnologyId> = Vec::new();
            for id in &request.technologies {
                if !explicit.contains(id) {
                    explicit.push(id.clone());
                }
            }
            (explicit, None)
        };

        if technologies.is_empty() && existing.is_none() {
            return Err(GignError::Application(ApplicationError::NothingToGenerate {
                reason: format!("no technologies detected in {}", request.root.display()),
            }));
        }

        let resolution = self.resolver.resolve_all(&technologies).await;
        warnings.extend(resolution.warnings);

        let mut set = resolution.set;
        if request.security {
            set.insert(TechnologyId::security(), security_template());
        }
        if let Some(text) = existing {
            set.prepend_custom(text);
        }
        if set.is_empty() {
            return Err(GignError::Application(ApplicationError::NothingToGenerate {
                reason: "no template could be resolved".into(),
            }));
        }

        let document = MergedDocument::merge(&set);
        let options = WriteOptions {
            backup: request.backup,
            dry_run: request.dry_run,
        };
        let outcome = {
            let writer = self.writer.clone();
            let target = target.clone();
            let document = document.clone();
            run_blocking(move || writer.write(&target, &document, options)).await?
        };

        let recommendations = detection
            .as_ref()
            .map(|d| recommend(&technologies, &d.stats, Some(&document)))
            .unwrap_or_default();

        info!(
            groups = document.groups().len(),
            rules = document.rule_count(),
            warnings = warnings.len(),
            "Generation finished"
        );

        Ok(GenerationReport {
            run_id,
            detections: detection.map(|d| d.detections).unwrap_or_default(),
            technologies: document.technologies().cloned().collect(),
            rule_count: document.rule_count(),
            content: document.to_text(),
            outcome,
            warnings,
            recommendations,
        })
    }
}

/// Existing file content. Invalid UTF-8 is fatal so user content is never dropped.
fn read_existing(filesystem: &dyn Filesystem, target: &Path) -> GignResult<Option<String>> {
    if !filesystem.exists(target) {
        return Ok(None);
    }
    let bytes = filesystem.read_bytes(target)?;
    String::from_utf8(bytes).map(Some).map_err(|_| {
        GignError::Application(ApplicationError::ExistingFileUnreadable {
            path: target.to_path_buf(),
        })
    })
}
