//! Custom template stores.

mod directory;
mod memory;

pub use directory::DirectoryTemplateStore;
pub use memory::InMemoryTemplateStore;
