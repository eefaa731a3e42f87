//! Template cache adapters.

mod file;
mod memory;

pub use file::FileTemplateCache;
pub use memory::InMemoryTemplateCache;
