//! Infrastructure adapters for gign.
//!
//! This crate implements the ports defined in `gign-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod bundled;
pub mod cache;
pub mod clock;
pub mod filesystem;
pub mod provider;
pub mod template_store;

// Re-export commonly used adapters
pub use bundled::BundledTemplates;
pub use cache::{FileTemplateCache, InMemoryTemplateCache};
pub use clock::{ManualClock, SystemClock};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use provider::{DEFAULT_API_URL, HttpTemplateProvider};
pub use template_store::{DirectoryTemplateStore, InMemoryTemplateStore};
