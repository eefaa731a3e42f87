//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "detect technologies" or "generate a file".

mod blocking;
pub mod detection_service;
pub mod generate_service;
pub mod output_writer;
pub mod template_resolver;
pub mod template_service;

pub use detection_service::{DetectionReport, TechnologyDetector};
pub use generate_service::{GITIGNORE, GenerateRequest, GenerateService};
pub use output_writer::{OutputWriter, WriteOptions};
pub use template_resolver::{
    CachePolicy, Resolution, ResolvedTemplate, TemplateResolver, TemplateSource,
};
pub use template_service::{TemplateInfo, TemplateOrigin, TemplateService};
