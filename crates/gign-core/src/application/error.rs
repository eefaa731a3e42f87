//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No source could supply a template for this id.
    #[error("No template source could resolve '{id}': {reason}")]
    ResolutionFailure { id: String, reason: String },

    /// The remote provider did not answer in time and no fallback existed.
    #[error("Fetching template '{id}' timed out after {seconds}s")]
    FetchTimeout { id: String, seconds: u64 },

    /// The output file could not be written. The target is untouched.
    #[error("Failed to write {path}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The scan root could not be read.
    #[error("Cannot scan {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    /// The existing ignore file exists but is not valid UTF-8.
    #[error("Existing file {path} is not valid UTF-8; refusing to overwrite it")]
    ExistingFileUnreadable { path: PathBuf },

    /// Nothing to generate (no technologies, or every resolution failed).
    #[error("Nothing to generate: {reason}")]
    NothingToGenerate { reason: String },

    /// A custom template with this name does not exist.
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// A custom template with this name already exists.
    #[error("Template '{name}' already exists")]
    TemplateExists { name: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Cache read or write failed.
    #[error("Template cache error: {reason}")]
    CacheError { reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ResolutionFailure { id, .. } => vec![
                format!("No template available for '{}'", id),
                "Try: gign template list to see available templates".into(),
                format!("Or add your own: gign template add {} <file>", id),
            ],
            Self::FetchTimeout { .. } => vec![
                "The template service did not respond in time".into(),
                "Retry later, raise templates.fetch_timeout_secs, or use --offline".into(),
            ],
            Self::WriteFailure { path, .. } | Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ScanFailed { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Or pass technologies explicitly with --tech".into(),
            ],
            Self::ExistingFileUnreadable { path } => vec![
                format!("Convert {} to UTF-8 first", path.display()),
                "Or regenerate from scratch with --fresh --backup".into(),
            ],
            Self::NothingToGenerate { .. } => vec![
                "No technologies were detected in this directory".into(),
                "Pass them explicitly: gign generate --tech rust --tech node".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No custom template named '{}'", name),
                "Try: gign template list".into(),
            ],
            Self::TemplateExists { name } => vec![
                format!("Remove it first: gign template remove {}", name),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ResolutionFailure { .. } | Self::TemplateNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::ScanFailed { .. } => ErrorCategory::NotFound,
            Self::FetchTimeout { .. } | Self::CacheError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
            Self::WriteFailure { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ExistingFileUnreadable { .. }
            | Self::NothingToGenerate { .. }
            | Self::TemplateExists { .. }
            | Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
