//! Run reports: what happened, and what went wrong without stopping the run.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::{Detection, Recommendation, TechnologyId};

/// Non-fatal problem recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// A subdirectory or manifest could not be read during detection.
    Detection { path: PathBuf, reason: String },
    /// No source could supply the template; the id was dropped.
    Resolution { id: TechnologyId, reason: String },
    /// The remote fetch timed out and nothing else could supply the template.
    FetchTimeout { id: TechnologyId, seconds: u64 },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detection { path, reason } => {
                write!(f, "skipped {}: {}", path.display(), reason)
            }
            Self::Resolution { id, reason } => write!(f, "no template for '{id}': {reason}"),
            Self::FetchTimeout { id, seconds } => {
                write!(f, "fetching '{id}' timed out after {seconds}s")
            }
        }
    }
}

/// Where the merged document went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WriteOutcome {
    Written {
        path: PathBuf,
        backup: Option<PathBuf>,
    },
    /// Dry run; nothing touched.
    Skipped,
    /// The document was empty, so no file was written.
    Empty,
}

/// Result of one `generate` run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub detections: Vec<Detection>,
    /// Technologies that contributed a group, in output order.
    pub technologies: Vec<TechnologyId>,
    pub rule_count: usize,
    pub content: String,
    pub outcome: WriteOutcome,
    pub warnings: Vec<RunWarning>,
    pub recommendations: Vec<Recommendation>,
}
