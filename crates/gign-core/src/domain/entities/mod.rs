pub mod detection;
pub mod merged_document;
pub mod pattern;
pub mod template_set;

pub use detection::{Detection, LARGE_FILE_BYTES, ProjectStats, security_template};
pub use merged_document::{MergedDocument, PatternGroup};
pub use pattern::{Pattern, PatternKind};
pub use template_set::{TemplateEntry, TemplateSet};
