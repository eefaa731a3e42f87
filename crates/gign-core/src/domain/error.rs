// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported per technology, then aggregated)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid technology identifier '{id}': {reason}")]
    InvalidTechnologyId { id: String, reason: String },

    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown technology: {0}")]
    UnknownTechnology(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTechnologyId { id, .. } => vec![
                format!("'{}' is not a valid technology identifier", id),
                "Identifiers use lowercase letters, digits and '+', '.', '_', '-'".into(),
                "Try: gign template list".into(),
            ],
            Self::InvalidTemplateName { reason, .. } => vec![
                format!("Name rejected: {}", reason),
                "Use at most 50 ASCII letters, digits, '-' or '_'".into(),
            ],
            Self::EmptyTemplate { template_id } => vec![
                format!("Template '{}' contains no patterns", template_id),
                "Add at least one ignore rule to the template file".into(),
            ],
            Self::UnknownTechnology(id) => vec![
                format!("No template is known for '{}'", id),
                "Try: gign template list".into(),
            ],
            Self::InvalidTemplate(_) => vec!["Run: gign template validate <file>".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTechnologyId { .. }
            | Self::InvalidTemplateName { .. }
            | Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. } => ErrorCategory::Validation,
            Self::UnknownTechnology(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
