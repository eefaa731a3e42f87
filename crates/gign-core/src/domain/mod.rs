//! Core domain layer for Gign.
//!
//! Pure logic: patterns, template sets, the merge engine, the marker
//! registry, recommendations and template validation.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable results**: `MergedDocument` is derived, never edited
//!
pub mod entities;
pub mod error;
pub mod markers;
pub mod recommendations;
pub mod validation;
pub mod value_objects;

pub use entities::{
    Detection, LARGE_FILE_BYTES, MergedDocument, Pattern, PatternGroup, PatternKind, ProjectStats,
    TemplateEntry, TemplateSet, security_template,
};
pub use error::{DomainError, ErrorCategory};
pub use markers::{IGNORED_DIRS, MARKER_REGISTRY, MarkerDef, MarkerPattern};
pub use recommendations::{Advice, Recommendation, recommend};
pub use validation::{Severity, TemplateIssue, TemplateValidator};
pub use value_objects::{CUSTOM_ID, Priority, SECURITY_ID, TechnologyId};

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TechnologyId {
        TechnologyId::parse(s).unwrap()
    }

    // ========================================================================
    // Merge + Recommendation interplay
    // ========================================================================

    #[test]
    fn merged_python_template_satisfies_python_community_patterns() {
        let mut set = TemplateSet::new();
        set.insert(
            tid("python"),
            "*.pyc\n__pycache__/\n.pytest_cache/\n.coverage\nhtmlcov/\n.tox/\n.venv/\nvenv/\n.mypy_cache/\n",
        );
        let doc = MergedDocument::merge(&set);

        let recs = recommend(&[tid("python")], &ProjectStats::default(), Some(&doc));
        assert!(recs.is_empty());
    }

    #[test]
    fn validator_accepts_what_merge_produces() {
        let mut set = TemplateSet::new();
        set.insert(tid("node"), "node_modules/\n\n\n# logs\n*.log\n");
        set.insert(tid("go"), "*.log\n*.exe\n");
        let text = MergedDocument::merge(&set).to_text();

        assert!(TemplateValidator::lint(&text).is_empty());
    }
}
