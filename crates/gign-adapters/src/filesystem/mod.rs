//! Filesystem adapters.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

use std::io;
use std::path::Path;

use gign_core::application::ApplicationError;
use gign_core::error::GignError;

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GignError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
