//! Technology detection.
//!
//! Walks the project tree up to a depth limit through the [`Filesystem`]
//! port, matching every entry against the marker registry and collecting
//! project stats along the way. Read-only.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{DirEntry, EntryKind, Filesystem, WalkEntry};
use crate::application::services::blocking::run_blocking;
use crate::application::report::RunWarning;
use crate::domain::entities::detection::extension_of;
use crate::domain::markers::{self, MARKER_REGISTRY, MarkerPattern};
use crate::domain::{Detection, ProjectStats, TechnologyId};
use crate::error::{GignError, GignResult};

/// Outcome of a scan.
#[derive(Debug, Clone, Default)]
pub struct DetectionReport {
    /// Sorted by confidence, most likely first.
    pub detections: Vec<Detection>,
    pub stats: ProjectStats,
    pub warnings: Vec<RunWarning>,
}

impl DetectionReport {
    pub fn technologies(&self) -> Vec<TechnologyId> {
        self.detections.iter().map(|d| d.technology.clone()).collect()
    }
}

#[derive(Clone)]
pub struct TechnologyDetector {
    filesystem: Arc<dyn Filesystem>,
    max_depth: usize,
}

impl TechnologyDetector {
    pub const DEFAULT_MAX_DEPTH: usize = 2;

    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Deepest directory level listed; the root is level 0.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[instrument(skip(self), fields(root = %root.display(), max_depth = self.max_depth))]
    pub fn detect(&self, root: &Path) -> GignResult<DetectionReport> {
        let mut report = DetectionReport::default();
        let mut matched: BTreeSet<usize> = BTreeSet::new();

        let walk = self
            .filesystem
            .walk(root, self.max_depth, &|e| markers::is_traversable(&e.name))
            .map_err(|e| {
                GignError::Application(ApplicationError::ScanFailed {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                })
            })?;

        for WalkEntry { entry, depth } in &walk.entries {
            let rel = relative(root, &entry.path);
            match entry.kind {
                EntryKind::File => {
                    report.stats.observe_file(&rel, &entry.name, entry.size);
                    self.match_file(entry, &mut matched, &mut report.warnings);
                }
                EntryKind::Dir => {
                    report.stats.observe_dir(&rel, &entry.name, *depth);
                    match_marker(&mut matched, |p| {
                        matches!(p, MarkerPattern::DirName(name) if name == entry.name)
                    });
                }
                EntryKind::Other => {}
            }
        }

        for (path, reason) in walk.unreadable {
            warn!(path = %path.display(), error = %reason, "Skipping unreadable directory");
            report.warnings.push(RunWarning::Detection { path, reason });
        }

        report.detections = score(&matched);
        info!(
            detected = report.detections.len(),
            files = report.stats.file_count,
            "Detection finished"
        );
        Ok(report)
    }

    /// [`Self::detect`] on the blocking pool, so the calling task can still
    /// be cancelled while a large tree is scanned.
    pub async fn scan(&self, root: &Path) -> GignResult<DetectionReport> {
        let detector = self.clone();
        let root = root.to_path_buf();
        run_blocking(move || detector.detect(&root)).await
    }

    fn match_file(
        &self,
        entry: &DirEntry,
        matched: &mut BTreeSet<usize>,
        warnings: &mut Vec<RunWarning>,
    ) {
        let lower = entry.name.to_ascii_lowercase();
        let ext = extension_of(&lower);

        match_marker(matched, |p| match p {
            MarkerPattern::FileName(name) => name == entry.name,
            MarkerPattern::Extension(wanted) => ext == Some(wanted),
            _ => false,
        });

        if !markers::manifest_files().any(|f| f == entry.name) {
            return;
        }
        match self.filesystem.read_bytes(&entry.path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes).to_ascii_lowercase();
                match_marker(matched, |p| match p {
                    MarkerPattern::ManifestContains { file, needle } => {
                        file == entry.name && content.contains(needle)
                    }
                    _ => false,
                });
            }
            Err(e) => {
                warn!(path = %entry.path.display(), error = %e, "Skipping unreadable manifest");
                warnings.push(RunWarning::Detection {
                    path: entry.path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

fn match_marker(matched: &mut BTreeSet<usize>, predicate: impl Fn(MarkerPattern) -> bool) {
    for (idx, def) in MARKER_REGISTRY.iter().enumerate() {
        if predicate(def.pattern) && matched.insert(idx) {
            debug!(marker = %def.pattern, "Marker matched");
        }
    }
}

/// Sum distinct marker weights per technology, cap at 1, rank.
fn score(matched: &BTreeSet<usize>) -> Vec<Detection> {
    let mut totals: HashMap<&'static str, (f64, Vec<String>)> = HashMap::new();

    for &idx in matched {
        let def = &MARKER_REGISTRY[idx];
        for &(tech, weight) in def.signals {
            let slot = totals.entry(tech).or_insert_with(|| (0.0, Vec::new()));
            slot.0 += weight;
            slot.1.push(def.pattern.to_string());
        }
    }

    let mut detections: Vec<(usize, Detection)> = totals
        .into_iter()
        .map(|(tech, (sum, markers))| {
            (
                markers::declaration_rank(tech),
                Detection {
                    technology: TechnologyId::from_static(tech),
                    confidence: sum.min(1.0),
                    markers,
                },
            )
        })
        .collect();

    detections.sort_by(|(rank_a, a), (rank_b, b)| {
        b.confidence
            .total_cmp(&a.confidence)
            .then(rank_a.cmp(rank_b))
    });
    detections.into_iter().map(|(_, d)| d).collect()
}

fn relative(root: &Path, path: &Path) -> String {
    let rel: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
