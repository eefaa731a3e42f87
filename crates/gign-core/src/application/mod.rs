//! Application layer for Gign.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, TemplateResolver, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//! - **Reports**: What a run produced and what it skipped
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All merge and detection rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{
    CachePolicy, DetectionReport, GITIGNORE, GenerateRequest, GenerateService, OutputWriter,
    Resolution, ResolvedTemplate, TechnologyDetector, TemplateInfo, TemplateOrigin,
    TemplateResolver, TemplateService, TemplateSource, WriteOptions,
};

pub use ports::{Clock, FallbackCatalog, Filesystem, TemplateCache, TemplateProvider, TemplateStore};

pub use error::ApplicationError;
pub use report::{GenerationReport, RunWarning, WriteOutcome};
